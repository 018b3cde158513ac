//! # Adapters
//!
//! In-process implementations of the outbound ports.

pub mod clock;
pub mod event_bus;
pub mod settlement_token;

pub use clock::{ManualClock, SystemTimeSource};
pub use event_bus::{
    InMemoryEventBus, RecordingPublisher, Subscription, SubscriptionError,
    DEFAULT_CHANNEL_CAPACITY,
};
pub use settlement_token::InMemorySettlementToken;
