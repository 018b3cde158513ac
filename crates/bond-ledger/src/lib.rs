//! # Bond Ledger - Fixed-Term Bond Issuance and Settlement
//!
//! Registered companies issue fixed-term, fixed-rate bonds. Participants buy
//! principal in a bond, paying principal plus simple interest up front in a
//! single deployment-wide settlement token. Holders may transfer principal to
//! other participants, and at or after maturity each holder redeems the whole
//! position (principal plus accrued interest).
//!
//! ## Interest
//!
//! ```text
//! interest = principal * rate_bps * seconds_to_maturity / 31_536_000 / 10_000
//! ```
//!
//! Credited once at purchase time, computed in 256-bit checked arithmetic and
//! truncated toward zero.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Principal held never exceeds `total_issued` | `domain/invariants.rs` - `check_principal_within_issued()` |
//! | Transfer conserves principal | `domain/invariants.rs` - `check_transfer_conserves_principal()` |
//! | No state change on failed settlement | `service.rs` - prepare / gateway / commit |
//! | Bond ids sequential from 0 | `domain/ledger.rs` - `create_bond()` |
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `SettlementGateway` | Pull purchase funds into custody, pay out redemptions |
//! | `TimeSource` | Current time for maturity checks and interest |
//! | `EventPublisher` | One notification per successful operation |
//!
//! ## Usage Example
//!
//! ```ignore
//! use bond_ledger::prelude::*;
//!
//! let service = create_test_service(1_700_000_000);
//! service.register_company(acme, "Acme", "Widgets", "").await?;
//! let bond = service.create_bond(acme, "Acme-5Y", maturity, 500).await?;
//! service.purchase_bond(alice, bond, U256::from(1_000)).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;
pub mod telemetry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{Bond, BondDetails, BondSupply, Company, Holding};

    // Value objects
    pub use crate::domain::value_objects::{
        Address, AddressParseError, BasisPoints, BondId, Timestamp, BASIS_POINTS_DENOMINATOR,
        SECONDS_PER_YEAR, U256,
    };

    // Domain logic
    pub use crate::domain::interest::calculate_interest;
    pub use crate::domain::invariants::{
        check_all_bonds, check_principal_within_issued, check_transfer_conserves_principal,
        InvariantViolation,
    };
    pub use crate::domain::ledger::{LedgerState, PurchasePlan, RedemptionPlan};

    // Ports
    pub use crate::ports::inbound::BondLedgerApi;
    pub use crate::ports::outbound::{EventPublisher, SettlementGateway, TimeSource};

    // Events
    pub use crate::events::{EventFilter, EventTopic, LedgerEvent};

    // Errors
    pub use crate::errors::{GatewayError, LedgerError};

    // Adapters
    pub use crate::adapters::{
        InMemoryEventBus, InMemorySettlementToken, ManualClock, RecordingPublisher,
        Subscription, SubscriptionError, SystemTimeSource,
    };

    // Configuration
    pub use crate::config::{ConfigError, LedgerConfig, TelemetryConfig};
    pub use crate::telemetry::{init_tracing, TelemetryError};

    // Service
    pub use crate::service::{create_test_service, BondLedgerService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
