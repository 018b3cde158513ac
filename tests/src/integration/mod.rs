//! End-to-end flows through `BondLedgerApi`.

pub mod events;
pub mod properties;
