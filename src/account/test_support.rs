//! Signable message types used by unit tests.

use std::io::{self, Write};

use super::signature::{Signable, Signature};
use crate::encoding::{write_byte_slice, write_u64, CanonicalSerialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestTransfer {
    pub from: u64,
    pub to: u64,
    pub amount: u64,
    pub memo: Vec<u8>,
    pub signature: Signature,
}

impl TestTransfer {
    pub fn new(from: u64, to: u64, amount: u64) -> Self {
        Self {
            from,
            to,
            amount,
            memo: b"rent".to_vec(),
            signature: Signature::default(),
        }
    }
}

impl CanonicalSerialize for TestTransfer {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_u64(writer, self.from)?;
        write_u64(writer, self.to)?;
        write_u64(writer, self.amount)?;
        write_byte_slice(writer, &self.memo)?;
        self.signature.canonical_serialize(writer)
    }
}

impl Signable for TestTransfer {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn set_signature(&mut self, signature: Signature) {
        self.signature = signature;
    }
}

/// Panics while being encoded.
pub struct Exploding {
    pub signature: Signature,
}

impl CanonicalSerialize for Exploding {
    fn canonical_serialize<W: Write>(&self, _writer: &mut W) -> io::Result<()> {
        panic!("encoder blew up");
    }
}

impl Signable for Exploding {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn set_signature(&mut self, signature: Signature) {
        self.signature = signature;
    }
}
