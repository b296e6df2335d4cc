//! Account identity and its ledger-tracked state.

use std::io::{self, Read, Write};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::signature::{ClearedSignature, Signable, Signature};
use super::status::AccountStatus;
use crate::crypto;
use crate::encoding::{
    read_byte_slice, read_u64, read_u8, read_uvarint, write_byte_slice, write_u64, write_u8,
    write_uvarint, CanonicalDeserialize, CanonicalSerialize,
};
use crate::error::{DecodeError, LedgerError, Result};

/// Numeric account id, assigned by the ledger in increasing order.
pub type AccountId = u64;

/// Id carried by accounts generated off-chain and not yet registered.
pub const PENDING_ACCOUNT_ID: AccountId = 0;

/// Bytes of the public key shown by `Display`.
const PUB_KEY_PREFIX_LEN: usize = 6;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub pub_key: Vec<u8>,
}

impl Account {
    pub fn new(id: AccountId, pub_key: Vec<u8>) -> Self {
        Self { id, pub_key }
    }

    pub fn is_registered(&self) -> bool {
        self.id != PENDING_ACCOUNT_ID
    }

    /// Checks `signature` over an already-formed message.
    ///
    /// A signature claiming another signer, or an empty one, is a caller bug
    /// and comes back as `ProtocolViolation`. A signature that simply doesn't
    /// match is `Ok(false)`.
    pub fn verify_bytes(&self, message: &[u8], signature: &Signature) -> Result<bool> {
        if signature.signer_id != self.id {
            return Err(LedgerError::ProtocolViolation(format!(
                "account id {} doesn't match signer id {}",
                self.id, signature.signer_id
            )));
        }
        if signature.is_zero() {
            return Err(LedgerError::ProtocolViolation(
                "signature is empty".to_string(),
            ));
        }

        let ok = crypto::verify(message, &self.pub_key, &signature.bytes);
        if ok {
            debug!(account = self.id, len = message.len(), "signature verified");
        } else {
            warn!(account = self.id, len = message.len(), "signature did not verify");
        }
        Ok(ok)
    }

    /// Verifies the signature carried inside `o`.
    ///
    /// The signed message is `o` encoded with its signature slot cleared. The
    /// slot is restored before this returns, whatever the outcome. The `&mut`
    /// borrow means no one else can touch `o` while the slot is cleared; callers
    /// sharing `o` across threads must hold its lock for the whole call.
    pub fn verify<S: Signable>(&self, o: &mut S) -> Result<bool> {
        let signature = o.signature().clone();
        let message = {
            let cleared = ClearedSignature::new(o);
            cleared.target().to_bytes()
        };
        self.verify_bytes(&message, &signature)
    }
}

impl CanonicalSerialize for Account {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_u64(writer, self.id)?;
        write_byte_slice(writer, &self.pub_key)
    }
}

impl CanonicalDeserialize for Account {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> std::result::Result<Self, DecodeError> {
        Ok(Account {
            id: read_u64(reader)?,
            pub_key: read_byte_slice(reader)?,
        })
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = &self.pub_key[..self.pub_key.len().min(PUB_KEY_PREFIX_LEN)];
        write!(f, "Account{{{}:{}}}", self.id, hex::encode_upper(prefix))
    }
}

//-----------------------------------------------------------------------------

/// An account plus the state the ledger tracks for it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountDetail {
    pub account: Account,
    /// Replay nonce; the ledger bumps it on every accepted operation.
    pub sequence: u64,
    pub balance: u64,
    pub status: AccountStatus,
}

impl AccountDetail {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            sequence: 0,
            balance: 0,
            status: AccountStatus::Nominal,
        }
    }
}

impl Deref for AccountDetail {
    type Target = Account;

    fn deref(&self) -> &Account {
        &self.account
    }
}

impl CanonicalSerialize for AccountDetail {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.account.canonical_serialize(writer)?;
        write_uvarint(writer, self.sequence)?;
        write_u64(writer, self.balance)?;
        write_u8(writer, self.status.as_byte())
    }
}

impl CanonicalDeserialize for AccountDetail {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> std::result::Result<Self, DecodeError> {
        Ok(AccountDetail {
            account: Account::canonical_deserialize(reader)?,
            sequence: read_uvarint(reader)?,
            balance: read_u64(reader)?,
            status: AccountStatus::try_from(read_u8(reader)?)?,
        })
    }
}

impl std::fmt::Display for AccountDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AccountDetail{{{}:{} Sequence:{} Balance:{} Status:{}}}",
            self.id,
            hex::encode_upper(&self.pub_key),
            self.sequence,
            self.balance,
            self.status
        )
    }
}
