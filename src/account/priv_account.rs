//! Accounts paired with their private key.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::ops::Deref;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::signature::{ClearedSignature, Signable, Signature};
use super::types::{Account, AccountId, PENDING_ACCOUNT_ID};
use crate::crypto::KeyPair;
use crate::encoding::CanonicalSerialize;
use crate::error::{LedgerError, Result};

/// On-disk key file. `pub_key` may be omitted; it is derived from `priv_key`.
#[derive(Serialize, Deserialize)]
struct KeyFile {
    id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub_key: Option<String>,
    priv_key: String,
}

/// Held only by the process that generated or loaded it. The private key
/// never enters ledger state.
#[derive(Clone)]
pub struct PrivAccount {
    pub account: Account,
    keypair: KeyPair,
}

impl PrivAccount {
    /// Generates a new account with private key.
    /// The id is pending since the account isn't in the ledger yet.
    pub fn generate() -> Self {
        let keypair = KeyPair::generate();
        info!("Generated account key {}", keypair.public_key_hex());
        Self {
            account: Account::new(PENDING_ACCOUNT_ID, keypair.public_key()),
            keypair,
        }
    }

    pub fn from_private_key(id: AccountId, priv_key: &[u8]) -> Result<Self> {
        let keypair = KeyPair::from_private_key(priv_key)?;
        Ok(Self {
            account: Account::new(id, keypair.public_key()),
            keypair,
        })
    }

    /// Parses a key file. Any failure is a `KeyLoad` error; callers at process
    /// start are expected to treat it as fatal.
    pub fn from_json(json: &[u8]) -> Result<Self> {
        let file: KeyFile = serde_json::from_slice(json)
            .map_err(|e| LedgerError::KeyLoad(format!("invalid key file: {}", e)))?;
        let priv_key = hex::decode(file.priv_key.trim())
            .map_err(|e| LedgerError::KeyLoad(format!("invalid priv_key hex: {}", e)))?;
        let priv_account = Self::from_private_key(file.id, &priv_key)
            .map_err(|e| LedgerError::KeyLoad(e.to_string()))?;

        if let Some(pub_hex) = file.pub_key {
            let pub_key = hex::decode(pub_hex.trim())
                .map_err(|e| LedgerError::KeyLoad(format!("invalid pub_key hex: {}", e)))?;
            if pub_key != priv_account.account.pub_key {
                return Err(LedgerError::KeyLoad(
                    "pub_key does not match the key derived from priv_key".to_string(),
                ));
            }
        }
        debug!("Loaded {}", priv_account.account);
        Ok(priv_account)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read(path).map_err(|e| {
            LedgerError::KeyLoad(format!("couldn't read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        let file = KeyFile {
            id: self.account.id,
            pub_key: Some(hex::encode(&self.account.pub_key)),
            priv_key: hex::encode(self.keypair.private_key()),
        };
        serde_json::to_string_pretty(&file).map_err(|e| LedgerError::KeyLoad(e.to_string()))
    }

    /// Writes the key file. Refuses to overwrite an existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                LedgerError::KeyLoad(format!("couldn't create {}: {}", path.display(), e))
            })?;
        file.write_all(json.as_bytes()).map_err(|e| {
            LedgerError::KeyLoad(format!("couldn't write {}: {}", path.display(), e))
        })?;
        info!("Saved key for {} to {}", self.account, path.display());
        Ok(())
    }

    pub fn priv_key(&self) -> Vec<u8> {
        self.keypair.private_key()
    }

    /// Signs a fully formed message.
    pub fn sign_bytes(&self, message: &[u8]) -> Signature {
        Signature::new(self.account.id, self.keypair.sign(message))
    }

    /// Signs `o` over its canonical encoding with the slot cleared, the same
    /// message `Account::verify` rebuilds, and stores the result in the slot.
    /// An object that already carries a signature is refused.
    pub fn sign<S: Signable>(&self, o: &mut S) -> Result<()> {
        if !o.signature().is_zero() {
            return Err(LedgerError::ProtocolViolation(
                "cannot sign: already signed".to_string(),
            ));
        }
        let message = {
            let cleared = ClearedSignature::new(o);
            cleared.target().to_bytes()
        };
        let signature = self.sign_bytes(&message);
        debug!(signer = self.account.id, len = message.len(), "signed message");
        o.set_signature(signature);
        Ok(())
    }
}

impl Deref for PrivAccount {
    type Target = Account;

    fn deref(&self) -> &Account {
        &self.account
    }
}

impl std::fmt::Debug for PrivAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivAccount")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
