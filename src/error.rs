use thiserror::Error;

/// Failures while reading canonical bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unexpected end of input while reading {0}")]
    Truncated(&'static str),
    #[error("Length prefix {declared} exceeds available bytes ({available})")]
    LengthOverflow { declared: u64, available: usize },
    #[error("Varint overflows 64 bits")]
    VarintOverflow,
    #[error("Varint is not in minimal form")]
    NonCanonicalVarint,
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
    #[error("Invalid account status byte: 0x{0:02X}")]
    InvalidStatus(u8),
    #[error("I/O error: {0}")]
    Io(String),
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),
    #[error("Couldn't load private account: {0}")]
    KeyLoad(String),
    #[error("Invalid key material: {0}")]
    InvalidKey(String),
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<sled::Error> for LedgerError {
    fn from(err: sled::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
