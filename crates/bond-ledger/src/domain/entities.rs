//! # Domain Entities
//!
//! Records owned by the ledger: companies, bonds and per-holder positions.

use crate::domain::value_objects::{Address, BasisPoints, BondId, Timestamp, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// COMPANY
// =============================================================================

/// Registration metadata for an issuer, keyed by the registering identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Display name (non-empty once registered).
    pub name: String,
    /// Free-form description (non-empty once registered).
    pub description: String,
    /// Logo text or URI, may be empty.
    pub logo: String,
}

impl Company {
    /// A company counts as registered only while its name is non-empty.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        !self.name.is_empty()
    }
}

// =============================================================================
// BOND
// =============================================================================

/// A fixed-term bond.
///
/// Terms are immutable after creation; only `total_issued` changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// Sequential identifier.
    pub id: BondId,
    /// Bond name.
    pub name: String,
    /// Absolute maturity timestamp.
    pub maturity_date: Timestamp,
    /// Annual rate in basis points.
    pub interest_rate: BasisPoints,
    /// Company that created the bond.
    pub issuer: Address,
    /// Cumulative settlement-token value received (principal + interest).
    ///
    /// Never decremented: redemption leaves it untouched.
    pub total_issued: U256,
}

impl Bond {
    /// Whether the bond has matured at `now`.
    #[must_use]
    pub fn is_matured(&self, now: Timestamp) -> bool {
        now >= self.maturity_date
    }
}

/// Read-model returned by `get_bond_details`.
///
/// Unknown bond ids yield the all-zero default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondDetails {
    /// Bond name.
    pub name: String,
    /// Absolute maturity timestamp.
    pub maturity_date: Timestamp,
    /// Annual rate in basis points.
    pub interest_rate: BasisPoints,
    /// Settlement token used for purchase and redemption.
    pub settlement_token: Address,
    /// Cumulative value received for this bond.
    pub total_issued: U256,
}

// =============================================================================
// HOLDING
// =============================================================================

/// A holder's position in one bond.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Principal invested or received by transfer.
    pub principal_balance: U256,
    /// Interest credited at purchase time.
    pub interest_accrued: U256,
}

impl Holding {
    /// Zero position, also the value of every untouched (bond, holder) pair.
    pub const EMPTY: Self = Self {
        principal_balance: U256([0; 4]),
        interest_accrued: U256([0; 4]),
    };

    /// True when both balances are zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.principal_balance.is_zero() && self.interest_accrued.is_zero()
    }
}

/// Aggregate over every holder of one bond.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondSupply {
    /// Sum of principal across holders.
    pub total_principal: U256,
    /// Sum of accrued interest across holders.
    pub total_interest_accrued: U256,
    /// Holders with a non-empty position.
    pub holder_count: usize,
}

// =============================================================================
// TESTS
// =============================================================================
