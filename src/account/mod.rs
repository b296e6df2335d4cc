//! Ledger accounts
//!
//! - `Account`: numeric id plus public key, and signature verification
//! - `AccountDetail`: the ledger-tracked sequence, balance and status
//! - `PrivAccount`: an account holding its private key, for signing
//! - `Signable`: messages that carry their own signature slot

pub mod codec;
pub mod priv_account;
pub mod signature;
pub mod status;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use codec::{AccountDetailCodec, Codec};
pub use priv_account::PrivAccount;
pub use signature::{Signable, Signature};
pub use status::AccountStatus;
pub use types::{Account, AccountDetail, AccountId, PENDING_ACCOUNT_ID};
