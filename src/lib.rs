pub mod account;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod storage;

pub use account::{
    Account, AccountDetail, AccountDetailCodec, AccountId, AccountStatus, Codec, PrivAccount,
    Signable, Signature,
};
pub use error::{DecodeError, LedgerError, Result};
