//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the ledger depends on:
//! - settlement token custody (pull on purchase, push on redemption)
//! - the global clock
//! - notification delivery

use crate::domain::value_objects::{Address, Timestamp, U256};
use crate::errors::GatewayError;
use crate::events::LedgerEvent;
use async_trait::async_trait;

// =============================================================================
// SETTLEMENT GATEWAY
// =============================================================================

/// Moves settlement-token value into and out of ledger custody.
///
/// Both calls either complete fully or return an error with no effect. The
/// ledger only commits its own bookkeeping after a call returns `Ok`.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// Pull `amount` from `from` into ledger custody.
    ///
    /// # Errors
    ///
    /// - `InsufficientAllowance` if `from` has not approved the ledger for `amount`
    /// - `InsufficientFunds` if `from` holds less than `amount`
    async fn transfer_in(&self, from: Address, amount: U256) -> Result<(), GatewayError>;

    /// Push `amount` from ledger custody to `to`.
    ///
    /// # Errors
    ///
    /// `InsufficientCustody` if the ledger holds less than `amount`.
    async fn transfer_out(&self, to: Address, amount: U256) -> Result<(), GatewayError>;
}

// =============================================================================
// TIME SOURCE
// =============================================================================

/// Global clock used for maturity checks.
///
/// Implementations must never go backwards.
pub trait TimeSource: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

// =============================================================================
// EVENT PUBLISHER
// =============================================================================

/// Delivers ledger notifications.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    async fn publish(&self, event: LedgerEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}
