//! # Event Bus Adapters
//!
//! `InMemoryEventBus` fans ledger events out to filtered subscribers over a
//! `tokio::sync::broadcast` channel. `RecordingPublisher` keeps every event in
//! order and is what tests assert against.

use crate::config::LedgerConfig;
use crate::events::{EventFilter, LedgerEvent};
use crate::ports::outbound::EventPublisher;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default broadcast channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

// =============================================================================
// IN-MEMORY BUS
// =============================================================================

/// Broadcast-backed event bus for single-process deployments.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<LedgerEvent>,
    events_published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Bus with [`DEFAULT_CHANNEL_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus with a specific channel capacity. Zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Bus sized by `config.event_channel_capacity`.
    #[must_use]
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::with_capacity(config.event_channel_capacity)
    }

    /// Subscribe to events matching `filter`.
    ///
    /// Only events published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, bonds = ?filter.bond_ids, "New subscription created");
        Subscription {
            receiver: self.sender.subscribe(),
            filter,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: LedgerEvent) -> usize {
        let name = event.name();
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(event = name, receivers, "Event published");
                receivers
            }
            Err(_) => {
                warn!(event = name, "Event dropped (no receivers)");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Errors from subscription receives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The bus was dropped.
    #[error("event bus closed")]
    Closed,
}

/// Receiving handle returned by [`InMemoryEventBus::subscribe`].
pub struct Subscription {
    receiver: broadcast::Receiver<LedgerEvent>,
    filter: EventFilter,
}

impl Subscription {
    /// Wait for the next matching event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<LedgerEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(lagged = count, "Subscriber lagged, events dropped");
                    continue;
                }
            };
            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Next matching event if one is already queued.
    ///
    /// # Errors
    ///
    /// `SubscriptionError::Closed` once the bus is gone and the queue drained.
    pub fn try_recv(&mut self) -> Result<Option<LedgerEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };
            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    /// Drain every matching event currently queued.
    pub fn drain(&mut self) -> Vec<LedgerEvent> {
        let mut out = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            out.push(event);
        }
        out
    }

    /// Filter applied to this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

// =============================================================================
// RECORDING PUBLISHER
// =============================================================================

/// Publisher that stores every event in publication order.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<LedgerEvent>>,
    published: AtomicU64,
}

impl RecordingPublisher {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().clone()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<LedgerEvent> {
        self.events.lock().last().cloned()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: LedgerEvent) -> usize {
        self.events.lock().push(event);
        self.published.fetch_add(1, Ordering::Relaxed);
        1
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
