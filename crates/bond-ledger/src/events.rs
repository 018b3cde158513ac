//! # Ledger Notifications
//!
//! One event is published per successful mutating operation. Indexers and
//! UIs subscribe to these instead of re-querying the ledger.
//!
//! | Event | Emitted by |
//! |-------|------------|
//! | `CompanyRegistered` | `register_company` |
//! | `BondCreated` | `create_bond` |
//! | `BondPurchased` | `purchase_bond` |
//! | `BondTransferred` | `transfer_bond` |
//! | `BondRedeemed` | `redeem_bond` |

use crate::domain::value_objects::{Address, BasisPoints, BondId, Timestamp, U256};
use serde::{Deserialize, Serialize};

/// All notifications emitted by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// A company registered or replaced its metadata.
    CompanyRegistered {
        /// Registering identity.
        company: Address,
        /// Company name.
        name: String,
        /// Company description.
        description: String,
        /// Logo text or URI.
        logo: String,
    },

    /// A registered company created a bond.
    BondCreated {
        /// Newly assigned id.
        bond_id: BondId,
        /// Bond name.
        name: String,
        /// Maturity timestamp.
        maturity_date: Timestamp,
        /// Annual rate in basis points.
        interest_rate: BasisPoints,
        /// Deployment settlement token.
        settlement_token: Address,
        /// Creating company.
        issuer: Address,
    },

    /// A participant bought into a bond.
    BondPurchased {
        /// Bond bought.
        bond_id: BondId,
        /// Buyer identity.
        buyer: Address,
        /// Principal credited.
        principal_amount: U256,
        /// Interest credited.
        interest: U256,
    },

    /// Principal moved between two holders.
    BondTransferred {
        /// Bond concerned.
        bond_id: BondId,
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
        /// Principal moved.
        amount: U256,
    },

    /// A holder redeemed at maturity.
    BondRedeemed {
        /// Bond redeemed.
        bond_id: BondId,
        /// Redeeming holder.
        holder: Address,
        /// Principal paid out.
        principal_amount: U256,
        /// Interest paid out.
        interest_amount: U256,
    },
}

/// Coarse event categories for subscription filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Company registry changes.
    Registry,
    /// Bond creation.
    Issuance,
    /// Purchases, transfers and redemptions.
    Holdings,
    /// Every topic.
    All,
}

impl LedgerEvent {
    /// Topic this event is published under.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CompanyRegistered { .. } => EventTopic::Registry,
            Self::BondCreated { .. } => EventTopic::Issuance,
            Self::BondPurchased { .. } | Self::BondTransferred { .. } | Self::BondRedeemed { .. } => {
                EventTopic::Holdings
            }
        }
    }

    /// Bond the event refers to, if any.
    #[must_use]
    pub fn bond_id(&self) -> Option<BondId> {
        match self {
            Self::CompanyRegistered { .. } => None,
            Self::BondCreated { bond_id, .. }
            | Self::BondPurchased { bond_id, .. }
            | Self::BondTransferred { bond_id, .. }
            | Self::BondRedeemed { bond_id, .. } => Some(*bond_id),
        }
    }

    /// Short event name, as used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CompanyRegistered { .. } => "CompanyRegistered",
            Self::BondCreated { .. } => "BondCreated",
            Self::BondPurchased { .. } => "BondPurchased",
            Self::BondTransferred { .. } => "BondTransferred",
            Self::BondRedeemed { .. } => "BondRedeemed",
        }
    }
}

/// Subscription filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Bonds to include. Empty means all bonds.
    pub bond_ids: Vec<BondId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            bond_ids: Vec::new(),
        }
    }

    /// Create a filter for events about specific bonds.
    ///
    /// Registry events carry no bond and never match.
    #[must_use]
    pub fn bonds(bond_ids: Vec<BondId>) -> Self {
        Self {
            topics: Vec::new(),
            bond_ids,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let bond_match = self.bond_ids.is_empty()
            || event
                .bond_id()
                .is_some_and(|id| self.bond_ids.contains(&id));

        topic_match && bond_match
    }
}
