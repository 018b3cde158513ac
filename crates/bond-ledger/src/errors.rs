//! # Error Types
//!
//! All error types surfaced by the ledger engine.

use crate::domain::value_objects::{Address, BondId, Timestamp, U256};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors returned by ledger operations.
///
/// Every variant aborts the whole operation; no partial state survives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Empty required text, zero amount or self-transfer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Caller is not a registered company.
    #[error("unauthorized: {0} is not a registered company")]
    Unauthorized(Address),

    /// Purchase attempted at or after maturity.
    #[error("bond {bond_id} matured at {maturity_date} (now {now})")]
    BondMatured {
        /// Bond the purchase targeted.
        bond_id: BondId,
        /// Recorded maturity, zero for unknown bonds.
        maturity_date: Timestamp,
        /// Time of the attempt.
        now: Timestamp,
    },

    /// Redemption attempted before maturity.
    #[error("bond {bond_id} not matured until {maturity_date} (now {now})")]
    BondNotMatured {
        /// Bond the redemption targeted.
        bond_id: BondId,
        /// Earliest redemption time.
        maturity_date: Timestamp,
        /// Time of the attempt.
        now: Timestamp,
    },

    /// Transfer amount exceeds the sender's principal.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Principal requested.
        required: U256,
        /// Principal the sender holds.
        available: U256,
    },

    /// Holder has no principal in this bond.
    #[error("nothing to redeem for {holder} in bond {bond_id}")]
    NothingToRedeem {
        /// Bond the redemption targeted.
        bond_id: BondId,
        /// Caller with an empty position.
        holder: Address,
    },

    /// Payer has not authorized the ledger to pull enough tokens.
    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance {
        /// Principal plus interest to pull.
        required: U256,
        /// Allowance granted to custody.
        approved: U256,
    },

    /// Settlement token movement failed.
    #[error("settlement transfer failed: {0}")]
    TransferFailed(GatewayError),

    /// Interest or balance arithmetic exceeded 256 bits.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl LedgerError {
    /// True for failures caused by the settlement layer rather than caller input.
    #[must_use]
    pub fn is_systemic(&self) -> bool {
        matches!(
            self,
            Self::TransferFailed(
                GatewayError::InsufficientCustody { .. } | GatewayError::Unavailable(_)
            )
        )
    }

    /// True for failures the caller can fix by changing its input or timing.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        !self.is_systemic() && !matches!(self, Self::ArithmeticOverflow)
    }
}

// =============================================================================
// GATEWAY ERRORS
// =============================================================================

/// Errors from the settlement token gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Payer approved less than the requested pull.
    #[error("allowance {approved} below required {required}")]
    InsufficientAllowance {
        /// Amount requested.
        required: U256,
        /// Allowance granted to custody.
        approved: U256,
    },

    /// Payer balance is below the requested pull.
    #[error("balance {available} of {account} below required {required}")]
    InsufficientFunds {
        /// Payer account.
        account: Address,
        /// Amount requested.
        required: U256,
        /// Payer balance.
        available: U256,
    },

    /// Ledger custody cannot cover a payout.
    #[error("custody balance {available} below payout {required}")]
    InsufficientCustody {
        /// Payout requested.
        required: U256,
        /// Funds held in custody.
        available: U256,
    },

    /// Token backend unreachable or rejected the call.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

impl From<GatewayError> for LedgerError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InsufficientAllowance { required, approved } => {
                LedgerError::InsufficientAllowance { required, approved }
            }
            other => LedgerError::TransferFailed(other),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
