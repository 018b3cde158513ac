//! # Domain Layer (Inner Hexagon)
//!
//! Pure bookkeeping logic for the bond ledger.
//! NO I/O, NO async, NO token movement.
//!
//! - `value_objects` - identities, amounts, time units
//! - `entities` - companies, bonds, holdings
//! - `interest` - simple-interest calculator
//! - `ledger` - the state object and its two-phase operations
//! - `invariants` - bookkeeping checks

pub mod entities;
pub mod interest;
pub mod invariants;
pub mod ledger;
pub mod value_objects;

pub use entities::*;
pub use interest::*;
pub use invariants::*;
pub use ledger::*;
pub use value_objects::*;
