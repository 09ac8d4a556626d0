//! Inner-chain transaction type tags and the aliased-sender classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed-transaction tags the rollup adds on top of the Ethereum set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TxType {
    /// L1 deposit minting value to an L2 account
    Deposit = 0x64,
    /// Unsigned call sent from an L1 account
    Unsigned = 0x65,
    /// Call triggered by an L1 contract
    Contract = 0x66,
    /// Execution attempt of a retryable ticket
    Retry = 0x68,
    /// Creation of a retryable ticket
    SubmitRetryable = 0x69,
    /// Chain-internal bookkeeping
    Internal = 0x6A,
    /// Transaction carried over from the pre-upgrade chain
    Legacy = 0x78,
}

impl TxType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x64 => Some(TxType::Deposit),
            0x65 => Some(TxType::Unsigned),
            0x66 => Some(TxType::Contract),
            0x68 => Some(TxType::Retry),
            0x69 => Some(TxType::SubmitRetryable),
            0x6A => Some(TxType::Internal),
            0x78 => Some(TxType::Legacy),
            _ => None,
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether the sender of this transaction type went through
    /// [`AliasOffsets::alias`](crate::AliasOffsets::alias).
    pub fn is_aliased(self) -> bool {
        matches!(self, TxType::Unsigned | TxType::Contract | TxType::Retry)
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxType::Deposit => "deposit",
            TxType::Unsigned => "unsigned",
            TxType::Contract => "contract",
            TxType::Retry => "retry",
            TxType::SubmitRetryable => "submit_retryable",
            TxType::Internal => "internal",
            TxType::Legacy => "legacy",
        };
        write!(f, "{s}")
    }
}

impl TryFrom<u8> for TxType {
    type Error = u8;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        TxType::from_byte(b).ok_or(b)
    }
}

/// Whether a raw transaction type tag carries an aliased sender.
/// Unknown tags, including every standard Ethereum type, return `false`.
pub fn does_tx_type_alias(tx_type: u8) -> bool {
    TxType::from_byte(tx_type).is_some_and(TxType::is_aliased)
}
