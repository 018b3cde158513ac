//! # Bond Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared participants and service builders
//! └── integration/      # End-to-end flows through the public API
//!     ├── lifecycle.rs  # Register -> issue -> buy -> transfer -> redeem
//!     ├── properties.rs # Randomised bookkeeping properties
//!     └── events.rs     # Notification delivery over the event bus
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bond-ledger-tests
//! cargo test -p bond-ledger-tests integration::lifecycle
//! cargo bench -p bond-ledger-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
