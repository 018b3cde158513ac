//! # Driving Ports (API - Inbound)
//!
//! The public operation surface of the ledger. Hosts (RPC bindings, UIs,
//! indexers) call into the engine only through this trait.
//!
//! Caller identity is always an explicit argument supplied by the host's
//! authentication layer; the engine never reads it from ambient context.

use crate::domain::entities::{BondDetails, BondSupply, Company, Holding};
use crate::domain::value_objects::{Address, BasisPoints, BondId, Timestamp, U256};
use crate::errors::LedgerError;
use async_trait::async_trait;

/// Bond ledger operations and queries.
#[async_trait]
pub trait BondLedgerApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Mutating operations (each atomic, one notification on success)
    // -------------------------------------------------------------------------

    /// Register or replace the caller's company metadata.
    async fn register_company(
        &self,
        caller: Address,
        name: &str,
        description: &str,
        logo: &str,
    ) -> Result<(), LedgerError>;

    /// Create a bond; caller must be a registered company.
    async fn create_bond(
        &self,
        caller: Address,
        name: &str,
        maturity_date: Timestamp,
        interest_rate: BasisPoints,
    ) -> Result<BondId, LedgerError>;

    /// Buy `principal_amount` of a bond, paying principal plus interest.
    async fn purchase_bond(
        &self,
        caller: Address,
        bond_id: BondId,
        principal_amount: U256,
    ) -> Result<(), LedgerError>;

    /// Move principal to another holder.
    async fn transfer_bond(
        &self,
        caller: Address,
        bond_id: BondId,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Redeem the caller's whole position at or after maturity.
    async fn redeem_bond(&self, caller: Address, bond_id: BondId) -> Result<(), LedgerError>;

    // -------------------------------------------------------------------------
    // Queries (read-only, total)
    // -------------------------------------------------------------------------

    /// True iff `identity` is a registered company.
    async fn is_registered(&self, identity: Address) -> bool;

    /// Company metadata, if registered.
    async fn get_company(&self, identity: Address) -> Option<Company>;

    /// Every assigned bond id, ascending from 0.
    async fn get_all_bond_ids(&self) -> Vec<BondId>;

    /// Number of bonds created so far.
    async fn bond_count(&self) -> u64;

    /// Bond terms and totals; zero defaults for unknown ids.
    async fn get_bond_details(&self, bond_id: BondId) -> BondDetails;

    /// Company that created `bond_id`.
    async fn get_bond_issuer(&self, bond_id: BondId) -> Option<Address>;

    /// Position of `account`; (0, 0) for untouched pairs.
    async fn get_bond_balance(&self, bond_id: BondId, account: Address) -> Holding;

    /// Aggregate position across all holders of `bond_id`.
    async fn get_bond_supply(&self, bond_id: BondId) -> Result<BondSupply, LedgerError>;
}
