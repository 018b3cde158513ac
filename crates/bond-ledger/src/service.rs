//! # Bond Ledger Service
//!
//! Wires the ledger state to the settlement gateway, clock and event
//! publisher, and implements [`BondLedgerApi`].
//!
//! ## Atomicity
//!
//! Every mutating operation holds the state write lock from validation to
//! notification. Token-moving operations run `prepare -> gateway -> commit`;
//! a gateway failure returns before `commit`, so state is never touched.
//! Operations are therefore serialized and notifications are published in
//! commit order.

use crate::adapters::{InMemorySettlementToken, ManualClock, RecordingPublisher};
use crate::config::LedgerConfig;
use crate::domain::entities::{BondDetails, BondSupply, Company, Holding};
use crate::domain::invariants::{check_all_bonds, InvariantViolation};
use crate::domain::ledger::LedgerState;
use crate::domain::value_objects::{Address, BasisPoints, BondId, Timestamp, U256};
use crate::errors::{GatewayError, LedgerError};
use crate::events::LedgerEvent;
use crate::ports::inbound::BondLedgerApi;
use crate::ports::outbound::{EventPublisher, SettlementGateway, TimeSource};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Counters for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Mutating operations that completed.
    pub operations_executed: u64,
    /// Mutating operations rejected by validation or the gateway.
    pub rejected_operations: u64,
    /// Rejections caused by the settlement gateway.
    pub gateway_failures: u64,
    /// Notifications handed to the publisher.
    pub events_published: u64,
}

/// The bond ledger engine.
pub struct BondLedgerService<G: SettlementGateway, T: TimeSource, P: EventPublisher> {
    config: LedgerConfig,
    state: Arc<RwLock<LedgerState>>,
    gateway: Arc<G>,
    clock: Arc<T>,
    publisher: Arc<P>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<G: SettlementGateway, T: TimeSource, P: EventPublisher> BondLedgerService<G, T, P> {
    /// Create an empty ledger.
    pub fn new(config: LedgerConfig, gateway: Arc<G>, clock: Arc<T>, publisher: Arc<P>) -> Self {
        let state = LedgerState::new(config.settlement_token);
        info!(
            settlement_token = %config.settlement_token,
            reject_past_maturity = config.reject_past_maturity,
            "Bond ledger created"
        );
        Self {
            config,
            state: Arc::new(RwLock::new(state)),
            gateway,
            clock,
            publisher,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Settlement gateway handle.
    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Clock handle.
    pub fn clock(&self) -> &Arc<T> {
        &self.clock
    }

    /// Publisher handle.
    pub fn publisher(&self) -> &Arc<P> {
        &self.publisher
    }

    /// Current counters.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Run every bookkeeping invariant over the current state.
    pub async fn check_invariants(&self) -> Vec<InvariantViolation> {
        check_all_bonds(&*self.state.read().await)
    }

    async fn reject(&self, operation: &'static str, err: LedgerError) -> LedgerError {
        self.stats.write().await.rejected_operations += 1;
        if err.is_caller_error() {
            warn!(operation, error = %err, "Operation rejected");
        } else {
            error!(operation, error = %err, "Operation failed");
        }
        err
    }

    async fn gateway_failure(&self, operation: &'static str, err: GatewayError) -> LedgerError {
        self.stats.write().await.gateway_failures += 1;
        self.reject(operation, err.into()).await
    }

    async fn complete(&self, operation: &'static str, event: LedgerEvent) {
        {
            let mut stats = self.stats.write().await;
            stats.operations_executed += 1;
            stats.events_published += 1;
        }
        let receivers = self.publisher.publish(event).await;
        debug!(operation, receivers, "Notification published");
    }
}

/// Service over in-memory adapters with a manual clock (for testing).
#[must_use]
pub fn create_test_service(
    now: Timestamp,
) -> BondLedgerService<InMemorySettlementToken, ManualClock, RecordingPublisher> {
    let token = Address::new([0xEE; 20]);
    let custody = Address::new([0xCC; 20]);
    BondLedgerService::new(
        LedgerConfig::with_token(token),
        Arc::new(InMemorySettlementToken::new(token, custody)),
        Arc::new(ManualClock::new(now)),
        Arc::new(RecordingPublisher::new()),
    )
}

// =============================================================================
// BondLedgerApi Implementation
// =============================================================================

#[async_trait]
impl<G: SettlementGateway, T: TimeSource, P: EventPublisher> BondLedgerApi
    for BondLedgerService<G, T, P>
{
    #[instrument(skip(self, description, logo))]
    async fn register_company(
        &self,
        caller: Address,
        name: &str,
        description: &str,
        logo: &str,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        let company = match state.register_company(caller, name, description, logo) {
            Ok(company) => company,
            Err(e) => return Err(self.reject("register_company", e).await),
        };

        info!(company = %caller, "Company registered");
        self.complete(
            "register_company",
            LedgerEvent::CompanyRegistered {
                company: caller,
                name: company.name,
                description: company.description,
                logo: company.logo,
            },
        )
        .await;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_bond(
        &self,
        caller: Address,
        name: &str,
        maturity_date: Timestamp,
        interest_rate: BasisPoints,
    ) -> Result<BondId, LedgerError> {
        let mut state = self.state.write().await;
        let now = self.clock.now();

        if self.config.reject_past_maturity && state.is_registered(&caller) && maturity_date <= now {
            let err = LedgerError::InvalidArgument(format!(
                "maturity date {maturity_date} is not after {now}"
            ));
            return Err(self.reject("create_bond", err).await);
        }

        let bond_id = match state.create_bond(caller, name, maturity_date, interest_rate) {
            Ok(id) => id,
            Err(e) => return Err(self.reject("create_bond", e).await),
        };

        info!(bond_id, issuer = %caller, "Bond created");
        self.complete(
            "create_bond",
            LedgerEvent::BondCreated {
                bond_id,
                name: name.to_owned(),
                maturity_date,
                interest_rate,
                settlement_token: state.settlement_token(),
                issuer: caller,
            },
        )
        .await;
        Ok(bond_id)
    }

    #[instrument(skip(self), fields(principal = %principal_amount))]
    async fn purchase_bond(
        &self,
        caller: Address,
        bond_id: BondId,
        principal_amount: U256,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        let now = self.clock.now();

        let plan = match state.prepare_purchase(caller, bond_id, principal_amount, now) {
            Ok(plan) => plan,
            Err(e) => return Err(self.reject("purchase_bond", e).await),
        };

        if let Err(e) = self.gateway.transfer_in(caller, plan.total).await {
            return Err(self.gateway_failure("purchase_bond", e).await);
        }
        state.commit_purchase(&plan);

        info!(
            bond_id,
            buyer = %caller,
            interest = %plan.interest,
            total = %plan.total,
            "Bond purchased"
        );
        self.complete(
            "purchase_bond",
            LedgerEvent::BondPurchased {
                bond_id,
                buyer: caller,
                principal_amount: plan.principal,
                interest: plan.interest,
            },
        )
        .await;
        Ok(())
    }

    #[instrument(skip(self), fields(amount = %amount))]
    async fn transfer_bond(
        &self,
        caller: Address,
        bond_id: BondId,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        if let Err(e) = state.transfer(caller, bond_id, to, amount) {
            return Err(self.reject("transfer_bond", e).await);
        }

        info!(bond_id, from = %caller, to = %to, "Bond principal transferred");
        self.complete(
            "transfer_bond",
            LedgerEvent::BondTransferred {
                bond_id,
                from: caller,
                to,
                amount,
            },
        )
        .await;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn redeem_bond(&self, caller: Address, bond_id: BondId) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        let now = self.clock.now();

        let plan = match state.prepare_redemption(caller, bond_id, now) {
            Ok(plan) => plan,
            Err(e) => return Err(self.reject("redeem_bond", e).await),
        };

        if let Err(e) = self.gateway.transfer_out(caller, plan.payout).await {
            return Err(self.gateway_failure("redeem_bond", e).await);
        }
        state.commit_redemption(&plan);

        info!(bond_id, holder = %caller, payout = %plan.payout, "Bond redeemed");
        self.complete(
            "redeem_bond",
            LedgerEvent::BondRedeemed {
                bond_id,
                holder: caller,
                principal_amount: plan.principal,
                interest_amount: plan.interest,
            },
        )
        .await;
        Ok(())
    }

    async fn is_registered(&self, identity: Address) -> bool {
        self.state.read().await.is_registered(&identity)
    }

    async fn get_company(&self, identity: Address) -> Option<Company> {
        self.state.read().await.company(&identity).cloned()
    }

    async fn get_all_bond_ids(&self) -> Vec<BondId> {
        self.state.read().await.all_bond_ids()
    }

    async fn bond_count(&self) -> u64 {
        self.state.read().await.bond_count()
    }

    async fn get_bond_details(&self, bond_id: BondId) -> BondDetails {
        let details = self.state.read().await.bond_details(bond_id);
        debug!(bond_id, total_issued = %details.total_issued, "Bond details read");
        details
    }

    async fn get_bond_issuer(&self, bond_id: BondId) -> Option<Address> {
        self.state.read().await.bond(bond_id).map(|bond| bond.issuer)
    }

    async fn get_bond_balance(&self, bond_id: BondId, account: Address) -> Holding {
        let holding = self.state.read().await.holding(bond_id, &account);
        debug!(
            bond_id,
            account = %account,
            principal = %holding.principal_balance,
            "Holding read"
        );
        holding
    }

    async fn get_bond_supply(&self, bond_id: BondId) -> Result<BondSupply, LedgerError> {
        let supply = self.state.read().await.supply(bond_id)?;
        debug!(bond_id, holders = supply.holder_count, "Bond supply read");
        Ok(supply)
    }
}

// =============================================================================
// TESTS
// =============================================================================
