//! Shared participants and service builders.

use bond_ledger::prelude::*;
use std::sync::Arc;

/// Start time for every scenario (2023-11-14T22:13:20Z).
pub const GENESIS: Timestamp = 1_700_000_000;

/// Settlement token identity.
pub const TOKEN: Address = Address([0xEE; 20]);
/// Ledger custody account inside the token.
pub const CUSTODY: Address = Address([0xCC; 20]);

/// Issuing company.
pub const ACME: Address = Address([0xAC; 20]);
/// First investor.
pub const ALICE: Address = Address([0xA1; 20]);
/// Second investor.
pub const BOB: Address = Address([0xB0; 20]);
/// Never registers anything.
pub const MALLORY: Address = Address([0x66; 20]);

/// Service recording events in memory.
pub type RecordingLedger =
    BondLedgerService<InMemorySettlementToken, ManualClock, RecordingPublisher>;

/// Service fanning events out over a broadcast bus.
pub type BusLedger = BondLedgerService<InMemorySettlementToken, ManualClock, InMemoryEventBus>;

fn token() -> Arc<InMemorySettlementToken> {
    Arc::new(InMemorySettlementToken::new(TOKEN, CUSTODY))
}

/// Fresh ledger at [`GENESIS`] with a recording publisher.
#[must_use]
pub fn recording_ledger() -> RecordingLedger {
    BondLedgerService::new(
        LedgerConfig::with_token(TOKEN),
        token(),
        Arc::new(ManualClock::new(GENESIS)),
        Arc::new(RecordingPublisher::new()),
    )
}

/// Fresh ledger at [`GENESIS`] publishing to an in-memory bus.
#[must_use]
pub fn bus_ledger() -> BusLedger {
    let config = LedgerConfig::with_token(TOKEN);
    let bus = InMemoryEventBus::from_config(&config);
    BondLedgerService::new(
        config,
        token(),
        Arc::new(ManualClock::new(GENESIS)),
        Arc::new(bus),
    )
}

/// Give `who` `amount` tokens and approve the ledger to pull all of them.
pub fn fund<P: EventPublisher>(
    ledger: &BondLedgerService<InMemorySettlementToken, ManualClock, P>,
    who: Address,
    amount: U256,
) {
    ledger
        .gateway()
        .mint(who, amount)
        .expect("mint within range");
    ledger.gateway().approve(who, amount);
}

/// Register Acme and issue a bond maturing `years` after genesis.
pub async fn issue_acme_bond<P: EventPublisher>(
    ledger: &BondLedgerService<InMemorySettlementToken, ManualClock, P>,
    years: u64,
    rate: BasisPoints,
) -> BondId {
    ledger
        .register_company(ACME, "Acme", "Industrial widgets", "ipfs://acme-logo")
        .await
        .expect("register Acme");
    ledger
        .create_bond(
            ACME,
            &format!("Acme-{years}Y"),
            GENESIS + years * SECONDS_PER_YEAR,
            rate,
        )
        .await
        .expect("create bond")
}
