//! # Bookkeeping Properties
//!
//! Random operation sequences against a full service, checking that
//! principal, custody and `total_issued` stay consistent whatever mix of
//! operations succeeds or fails.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use bond_ledger::prelude::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Action {
        Purchase { who: u8, amount: u64 },
        Transfer { from: u8, to: u8, amount: u64 },
        Redeem { who: u8 },
        Wait { seconds: u64 },
    }

    fn holder(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => (1u8..6, 1u64..100_000).prop_map(|(who, amount)| Action::Purchase { who, amount }),
            3 => (1u8..6, 1u8..6, 0u64..100_000)
                .prop_map(|(from, to, amount)| Action::Transfer { from, to, amount }),
            2 => (1u8..6).prop_map(|who| Action::Redeem { who }),
            1 => (0u64..SECONDS_PER_YEAR).prop_map(|seconds| Action::Wait { seconds }),
        ]
    }

    #[derive(Default)]
    struct Expected {
        principal_outstanding: U256,
        paid_in: U256,
        paid_out: U256,
    }

    async fn run(actions: Vec<Action>) -> Result<(), TestCaseError> {
        let ledger = recording_ledger();
        let bond = issue_acme_bond(&ledger, 2, 750).await;
        for n in 1u8..6 {
            fund(&ledger, holder(n), U256::from(u64::MAX));
        }

        let mut expected = Expected::default();
        for action in actions {
            match action {
                Action::Purchase { who, amount } => {
                    let before = ledger.get_bond_details(bond).await.total_issued;
                    if ledger
                        .purchase_bond(holder(who), bond, U256::from(amount))
                        .await
                        .is_ok()
                    {
                        let after = ledger.get_bond_details(bond).await.total_issued;
                        expected.principal_outstanding += U256::from(amount);
                        expected.paid_in += after - before;
                    }
                }
                Action::Transfer { from, to, amount } => {
                    let before = ledger.get_bond_supply(bond).await.unwrap();
                    let _ = ledger
                        .transfer_bond(holder(from), bond, holder(to), U256::from(amount))
                        .await;
                    let after = ledger.get_bond_supply(bond).await.unwrap();
                    prop_assert!(check_transfer_conserves_principal(bond, &before, &after).is_ok());
                }
                Action::Redeem { who } => {
                    let position = ledger.get_bond_balance(bond, holder(who)).await;
                    if ledger.redeem_bond(holder(who), bond).await.is_ok() {
                        expected.principal_outstanding -= position.principal_balance;
                        expected.paid_out +=
                            position.principal_balance + position.interest_accrued;
                    }
                }
                Action::Wait { seconds } => {
                    ledger.clock().advance(seconds);
                }
            }

            let supply = ledger.get_bond_supply(bond).await.unwrap();
            let total_issued = ledger.get_bond_details(bond).await.total_issued;
            prop_assert!(supply.total_principal <= total_issued);
            prop_assert_eq!(supply.total_principal, expected.principal_outstanding);
            prop_assert_eq!(total_issued, expected.paid_in);
            prop_assert_eq!(
                ledger.gateway().custody_balance(),
                expected.paid_in - expected.paid_out
            );
            prop_assert!(ledger.check_invariants().await.is_empty());
        }
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_service_bookkeeping_consistent(actions in prop::collection::vec(action(), 1..60)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(run(actions))?;
        }

        #[test]
        fn prop_interest_zero_once_matured(
            principal in 1u64..u64::MAX,
            rate in 0u64..100_000,
            maturity in 0u64..GENESIS,
            now_offset in 0u64..SECONDS_PER_YEAR,
        ) {
            let now = GENESIS + now_offset;
            let interest = calculate_interest(U256::from(principal), rate, maturity, now).unwrap();
            prop_assert!(interest.is_zero());
        }
    }
}
