//! Detached signatures and the `Signable` capability.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::encoding::{
    read_byte_slice, read_u64, write_byte_slice, write_u64, CanonicalDeserialize,
    CanonicalSerialize,
};
use crate::error::DecodeError;

/// A signature claimed to come from account `signer_id`.
/// Empty `bytes` means "not signed yet".
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    pub signer_id: u64,
    pub bytes: Vec<u8>,
}

impl Signature {
    pub fn new(signer_id: u64, bytes: Vec<u8>) -> Self {
        Self { signer_id, bytes }
    }

    pub fn is_zero(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl CanonicalSerialize for Signature {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_u64(writer, self.signer_id)?;
        write_byte_slice(writer, &self.bytes)
    }
}

impl CanonicalDeserialize for Signature {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self, DecodeError> {
        Ok(Signature {
            signer_id: read_u64(reader)?,
            bytes: read_byte_slice(reader)?,
        })
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature{{{}:{}}}", self.signer_id, hex::encode_upper(&self.bytes))
    }
}

/// A message that carries its own signature slot.
///
/// `canonical_serialize` must write the slot like any other field, so that an
/// object with a zero signature always encodes the same way. Signing and
/// verifying both encode with the slot cleared.
pub trait Signable: CanonicalSerialize {
    fn signature(&self) -> &Signature;

    fn set_signature(&mut self, signature: Signature);

    fn clear_signature(&mut self) {
        self.set_signature(Signature::default());
    }
}

/// Clears the signature slot of `target` for as long as the guard lives and
/// puts the original back on drop, including during unwinding.
pub(crate) struct ClearedSignature<'a, S: Signable> {
    target: &'a mut S,
    saved: Option<Signature>,
}

impl<'a, S: Signable> ClearedSignature<'a, S> {
    pub(crate) fn new(target: &'a mut S) -> Self {
        let saved = target.signature().clone();
        target.clear_signature();
        Self {
            target,
            saved: Some(saved),
        }
    }

    pub(crate) fn target(&self) -> &S {
        &*self.target
    }
}

impl<S: Signable> Drop for ClearedSignature<'_, S> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.target.set_signature(saved);
        }
    }
}
