//! # Domain Invariants
//!
//! Bookkeeping invariants that must hold after every completed operation.
//!
//! - Principal held across all holders of a bond never exceeds `total_issued`.
//! - A transfer leaves the bond's total principal unchanged.

use crate::domain::entities::BondSupply;
use crate::domain::ledger::LedgerState;
use crate::domain::value_objects::{BondId, U256};

/// A broken invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Outstanding principal is larger than everything ever deposited.
    PrincipalExceedsIssued {
        /// Bond concerned.
        bond_id: BondId,
        /// Sum of holder principal.
        principal: U256,
        /// Recorded `total_issued`.
        total_issued: U256,
    },
    /// A transfer created or destroyed principal.
    PrincipalNotConserved {
        /// Bond concerned.
        bond_id: BondId,
        /// Supply before the transfer.
        before: U256,
        /// Supply after the transfer.
        after: U256,
    },
    /// Holder balances could not be summed.
    SupplyOverflow {
        /// Bond concerned.
        bond_id: BondId,
    },
}

/// Sum of principal across holders must not exceed `total_issued`.
pub fn check_principal_within_issued(
    state: &LedgerState,
    bond_id: BondId,
) -> Result<BondSupply, InvariantViolation> {
    let supply = state
        .supply(bond_id)
        .map_err(|_| InvariantViolation::SupplyOverflow { bond_id })?;
    let total_issued = state.bond_details(bond_id).total_issued;
    if supply.total_principal > total_issued {
        return Err(InvariantViolation::PrincipalExceedsIssued {
            bond_id,
            principal: supply.total_principal,
            total_issued,
        });
    }
    Ok(supply)
}

/// Compare supply snapshots taken around a transfer.
pub fn check_transfer_conserves_principal(
    bond_id: BondId,
    before: &BondSupply,
    after: &BondSupply,
) -> Result<(), InvariantViolation> {
    if before.total_principal != after.total_principal {
        return Err(InvariantViolation::PrincipalNotConserved {
            bond_id,
            before: before.total_principal,
            after: after.total_principal,
        });
    }
    Ok(())
}

/// Run [`check_principal_within_issued`] for every bond.
#[must_use]
pub fn check_all_bonds(state: &LedgerState) -> Vec<InvariantViolation> {
    state
        .all_bond_ids()
        .into_iter()
        .filter_map(|id| check_principal_within_issued(state, id).err())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
