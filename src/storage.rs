use std::path::Path;

use tracing::info;

use crate::account::{AccountDetail, AccountDetailCodec, AccountId, Codec, PENDING_ACCOUNT_ID};
use crate::error::{DecodeError, LedgerError, Result};

/// Account details persisted in sled, keyed by `account:<id>`.
///
/// Keys are built here from the account id; the codec is only used for values.
pub struct AccountStore<C: Codec<Item = AccountDetail> = AccountDetailCodec> {
    db: sled::Db,
    codec: C,
}

fn account_key(id: AccountId) -> String {
    format!("account:{}", id)
}

impl AccountStore<AccountDetailCodec> {
    pub fn open(path: &Path) -> Result<Self> {
        let db = sled::open(path)?;
        info!("Persistence: Opened account store at '{}'", path.display());
        Ok(Self::with_codec(db, AccountDetailCodec))
    }

    /// In-memory store that is discarded on drop.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self::with_codec(db, AccountDetailCodec))
    }
}

impl<C: Codec<Item = AccountDetail>> AccountStore<C> {
    pub fn with_codec(db: sled::Db, codec: C) -> Self {
        Self { db, codec }
    }

    // Generic Helper: Put
    fn put(&self, key: &str, value: &AccountDetail) -> Result<()> {
        let mut serialized = Vec::new();
        self.codec
            .encode(value, &mut serialized)
            .map_err(|e| LedgerError::Storage(e.to_string()))?;
        self.db.insert(key.as_bytes(), serialized)?;
        Ok(())
    }

    // Generic Helper: Get
    fn get_raw(&self, key: &str) -> Result<Option<AccountDetail>> {
        match self.db.get(key.as_bytes())? {
            Some(data) => {
                let mut cursor: &[u8] = &data;
                let detail = self.codec.decode(&mut cursor)?;
                if !cursor.is_empty() {
                    return Err(DecodeError::TrailingBytes(cursor.len()).into());
                }
                Ok(Some(detail))
            }
            None => Ok(None),
        }
    }

    /// Stores `detail` under its id. Pending accounts have no id yet and are refused.
    pub fn save(&self, detail: &AccountDetail) -> Result<()> {
        if detail.id == PENDING_ACCOUNT_ID {
            return Err(LedgerError::InvalidState(
                "cannot store an account that has no ledger id".to_string(),
            ));
        }
        self.put(&account_key(detail.id), detail)
    }

    pub fn get(&self, id: AccountId) -> Result<Option<AccountDetail>> {
        self.get_raw(&account_key(id))
    }

    pub fn remove(&self, id: AccountId) -> Result<bool> {
        Ok(self.db.remove(account_key(id).as_bytes())?.is_some())
    }

    pub fn len(&self) -> usize {
        self.db.scan_prefix(b"account:").count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
