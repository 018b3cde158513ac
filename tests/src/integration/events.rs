//! # Notification Flows
//!
//! Subscribers on the in-memory bus see exactly one notification per
//! successful operation, in commit order, and nothing for rejections.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use bond_ledger::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_subscriber_sees_lifecycle_in_order() {
        let ledger = bus_ledger();
        let mut all = ledger.publisher().subscribe(EventFilter::all());

        let bond = issue_acme_bond(&ledger, 1, 500).await;
        fund(&ledger, ALICE, U256::from(1_050));
        ledger
            .purchase_bond(ALICE, bond, U256::from(1_000))
            .await
            .unwrap();

        let first = timeout(Duration::from_millis(100), all.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert!(matches!(
            first,
            LedgerEvent::CompanyRegistered { company, .. } if company == ACME
        ));

        let rest = all.drain();
        assert_eq!(rest.len(), 2);
        assert_eq!(
            rest[0],
            LedgerEvent::BondCreated {
                bond_id: bond,
                name: "Acme-1Y".into(),
                maturity_date: GENESIS + SECONDS_PER_YEAR,
                interest_rate: 500,
                settlement_token: TOKEN,
                issuer: ACME,
            }
        );
        assert_eq!(
            rest[1],
            LedgerEvent::BondPurchased {
                bond_id: bond,
                buyer: ALICE,
                principal_amount: U256::from(1_000),
                interest: U256::from(50),
            }
        );
    }

    #[tokio::test]
    async fn test_rejections_publish_nothing() {
        let ledger = bus_ledger();
        let bond = issue_acme_bond(&ledger, 1, 500).await;
        let mut holdings = ledger
            .publisher()
            .subscribe(EventFilter::topics(vec![EventTopic::Holdings]));

        assert!(ledger
            .purchase_bond(ALICE, bond, U256::from(1_000))
            .await
            .is_err());
        assert!(ledger
            .transfer_bond(ALICE, bond, BOB, U256::from(1))
            .await
            .is_err());
        assert!(ledger.redeem_bond(ALICE, bond).await.is_err());
        assert!(ledger.create_bond(MALLORY, "X", GENESIS + 1, 1).await.is_err());

        assert_eq!(holdings.try_recv(), Ok(None));
        assert_eq!(ledger.publisher().events_published(), 2);
        assert_eq!(ledger.stats().await.rejected_operations, 4);
    }

    #[tokio::test]
    async fn test_bond_filter_isolates_bonds() {
        let ledger = bus_ledger();
        let first = issue_acme_bond(&ledger, 1, 500).await;
        let second = ledger
            .create_bond(ACME, "Acme-Short", GENESIS + 86_400, 100)
            .await
            .unwrap();
        let mut watch_second = ledger.publisher().subscribe(EventFilter::bonds(vec![second]));

        fund(&ledger, ALICE, U256::from(10_000));
        ledger
            .purchase_bond(ALICE, first, U256::from(1_000))
            .await
            .unwrap();
        ledger
            .purchase_bond(ALICE, second, U256::from(2_000))
            .await
            .unwrap();

        let events = watch_second.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].bond_id(), Some(second));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_operations_publish_in_commit_order() {
        let ledger = Arc::new(bus_ledger());
        let bond = issue_acme_bond(&*ledger, 1, 500).await;
        let mut sub = ledger
            .publisher()
            .subscribe(EventFilter::topics(vec![EventTopic::Holdings]));

        let buyers: Vec<Address> = (1u8..=8).map(|n| Address::new([n; 20])).collect();
        for buyer in &buyers {
            fund(&*ledger, *buyer, U256::from(105));
        }

        let handles: Vec<_> = buyers
            .iter()
            .copied()
            .map(|buyer| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.purchase_bond(buyer, bond, U256::from(100)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let events = sub.drain();
        assert_eq!(events.len(), buyers.len());

        // each purchase pulled 100 principal plus 5 interest
        let supply = ledger.get_bond_supply(bond).await.unwrap();
        assert_eq!(supply.holder_count, buyers.len());
        assert_eq!(
            ledger.get_bond_details(bond).await.total_issued,
            U256::from(105 * buyers.len() as u64)
        );
    }
}
