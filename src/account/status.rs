//! Validator role lifecycle of an account.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Status byte stored with every `AccountDetail`.
///
/// The set is closed: decoding any other byte fails. Transition enforcement
/// belongs to the ledger's state-transition logic, which can use
/// [`AccountStatus::can_transition_to`] to express it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccountStatus {
    /// No special role.
    #[default]
    Nominal = 0x00,
    /// Actively participating as a validator.
    Bonded = 0x01,
    /// Leaving the validator role; funds not yet released.
    Unbonding = 0x02,
    /// Evicted for provable misbehavior. Terminal.
    DupedOut = 0x03,
}

impl AccountStatus {
    pub const ALL: [AccountStatus; 4] = [
        AccountStatus::Nominal,
        AccountStatus::Bonded,
        AccountStatus::Unbonding,
        AccountStatus::DupedOut,
    ];

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AccountStatus::DupedOut)
    }

    /// Whether the ledger may move an account from `self` to `next`.
    pub fn can_transition_to(self, next: AccountStatus) -> bool {
        use AccountStatus::*;
        matches!(
            (self, next),
            (Nominal, Bonded)
                | (Bonded, Unbonding)
                | (Unbonding, Nominal)
                | (Bonded, DupedOut)
                | (Unbonding, DupedOut)
        )
    }
}

impl TryFrom<u8> for AccountStatus {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x00 => Ok(AccountStatus::Nominal),
            0x01 => Ok(AccountStatus::Bonded),
            0x02 => Ok(AccountStatus::Unbonding),
            0x03 => Ok(AccountStatus::DupedOut),
            other => Err(DecodeError::InvalidStatus(other)),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Nominal => write!(f, "nominal"),
            AccountStatus::Bonded => write!(f, "bonded"),
            AccountStatus::Unbonding => write!(f, "unbonding"),
            AccountStatus::DupedOut => write!(f, "duped-out"),
        }
    }
}
