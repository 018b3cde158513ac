//! # Ledger State
//!
//! The single state object behind the engine: company registry, bond
//! registry and holding ledger.
//!
//! Operations that move settlement tokens are split in two phases. `prepare_*`
//! validates and computes every new value without touching state; `commit_*`
//! applies a prepared plan and cannot fail. The service runs the gateway call
//! between the two, so a gateway failure leaves state untouched.

use crate::domain::entities::{Bond, BondDetails, BondSupply, Company, Holding};
use crate::domain::interest::calculate_interest;
use crate::domain::value_objects::{Address, BasisPoints, BondId, Timestamp, U256};
use crate::errors::LedgerError;
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// PLANS
// =============================================================================

/// A validated purchase awaiting settlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchasePlan {
    /// Bond being bought.
    pub bond_id: BondId,
    /// Buyer identity.
    pub buyer: Address,
    /// Principal credited to the buyer.
    pub principal: U256,
    /// Interest credited to the buyer.
    pub interest: U256,
    /// `principal + interest`, pulled from the buyer.
    pub total: U256,
    holding_after: Holding,
    total_issued_after: U256,
}

/// A validated redemption awaiting payout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedemptionPlan {
    /// Bond being redeemed.
    pub bond_id: BondId,
    /// Redeeming holder.
    pub holder: Address,
    /// Principal paid out.
    pub principal: U256,
    /// Interest paid out.
    pub interest: U256,
    /// `principal + interest`, pushed to the holder.
    pub payout: U256,
}

// =============================================================================
// LEDGER STATE
// =============================================================================

/// All mutable ledger state.
#[derive(Debug, Default)]
pub struct LedgerState {
    settlement_token: Address,
    companies: HashMap<Address, Company>,
    /// Index is the bond id.
    bonds: Vec<Bond>,
    holdings: BTreeMap<(BondId, Address), Holding>,
}

impl LedgerState {
    /// Create an empty ledger settling in `settlement_token`.
    #[must_use]
    pub fn new(settlement_token: Address) -> Self {
        Self {
            settlement_token,
            ..Self::default()
        }
    }

    /// Deployment-wide settlement token.
    #[must_use]
    pub fn settlement_token(&self) -> Address {
        self.settlement_token
    }

    // -------------------------------------------------------------------------
    // Company registry
    // -------------------------------------------------------------------------

    /// Insert or replace the company record for `caller`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `name` or `description` is empty.
    pub fn register_company(
        &mut self,
        caller: Address,
        name: &str,
        description: &str,
        logo: &str,
    ) -> Result<Company, LedgerError> {
        if name.is_empty() {
            return Err(LedgerError::InvalidArgument("company name is empty".into()));
        }
        if description.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "company description is empty".into(),
            ));
        }

        let company = Company {
            name: name.to_owned(),
            description: description.to_owned(),
            logo: logo.to_owned(),
        };
        self.companies.insert(caller, company.clone());
        Ok(company)
    }

    /// True iff `identity` has a company record with a non-empty name.
    #[must_use]
    pub fn is_registered(&self, identity: &Address) -> bool {
        self.companies
            .get(identity)
            .is_some_and(Company::is_registered)
    }

    /// Company metadata, if any.
    #[must_use]
    pub fn company(&self, identity: &Address) -> Option<&Company> {
        self.companies.get(identity)
    }

    // -------------------------------------------------------------------------
    // Bond registry
    // -------------------------------------------------------------------------

    /// Create a bond and return its id.
    ///
    /// Maturity and rate are stored as given.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `caller` is not a registered company.
    pub fn create_bond(
        &mut self,
        caller: Address,
        name: &str,
        maturity_date: Timestamp,
        interest_rate: BasisPoints,
    ) -> Result<BondId, LedgerError> {
        if !self.is_registered(&caller) {
            return Err(LedgerError::Unauthorized(caller));
        }

        let id = self.bond_count();
        self.bonds.push(Bond {
            id,
            name: name.to_owned(),
            maturity_date,
            interest_rate,
            issuer: caller,
            total_issued: U256::zero(),
        });
        Ok(id)
    }

    /// Number of bonds created so far.
    #[must_use]
    pub fn bond_count(&self) -> BondId {
        self.bonds.len() as BondId
    }

    /// Bond ids `0..bond_count()` in order.
    #[must_use]
    pub fn all_bond_ids(&self) -> Vec<BondId> {
        (0..self.bond_count()).collect()
    }

    /// Bond record, if created.
    #[must_use]
    pub fn bond(&self, bond_id: BondId) -> Option<&Bond> {
        usize::try_from(bond_id)
            .ok()
            .and_then(|idx| self.bonds.get(idx))
    }

    /// Bond details; zero-valued defaults for unknown ids.
    #[must_use]
    pub fn bond_details(&self, bond_id: BondId) -> BondDetails {
        match self.bond(bond_id) {
            Some(bond) => BondDetails {
                name: bond.name.clone(),
                maturity_date: bond.maturity_date,
                interest_rate: bond.interest_rate,
                settlement_token: self.settlement_token,
                total_issued: bond.total_issued,
            },
            None => BondDetails::default(),
        }
    }

    /// Terms used for validation; unknown ids read as a default bond whose
    /// maturity (0) is already past.
    fn terms(&self, bond_id: BondId) -> Bond {
        self.bond(bond_id).cloned().unwrap_or_else(|| Bond {
            id: bond_id,
            ..Bond::default()
        })
    }

    // -------------------------------------------------------------------------
    // Holding ledger
    // -------------------------------------------------------------------------

    /// Position of `account` in `bond_id`; (0, 0) if never touched.
    #[must_use]
    pub fn holding(&self, bond_id: BondId, account: &Address) -> Holding {
        self.holdings
            .get(&(bond_id, *account))
            .copied()
            .unwrap_or(Holding::EMPTY)
    }

    /// Iterate every recorded position in `bond_id`, including zeroed ones.
    pub fn holders(&self, bond_id: BondId) -> impl Iterator<Item = (&Address, &Holding)> + '_ {
        self.holdings
            .range((bond_id, Address::ZERO)..=(bond_id, Address::new([0xff; 20])))
            .map(|((_, holder), holding)| (holder, holding))
    }

    /// Sum of positions across all holders of `bond_id`.
    ///
    /// # Errors
    ///
    /// `ArithmeticOverflow` if a sum exceeds 256 bits.
    pub fn supply(&self, bond_id: BondId) -> Result<BondSupply, LedgerError> {
        let mut supply = BondSupply::default();
        for (_, holding) in self.holders(bond_id) {
            if holding.is_empty() {
                continue;
            }
            supply.total_principal = supply
                .total_principal
                .checked_add(holding.principal_balance)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            supply.total_interest_accrued = supply
                .total_interest_accrued
                .checked_add(holding.interest_accrued)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            supply.holder_count += 1;
        }
        Ok(supply)
    }

    // -------------------------------------------------------------------------
    // Purchase
    // -------------------------------------------------------------------------

    /// Validate a purchase and compute the resulting balances.
    ///
    /// # Errors
    ///
    /// - `BondMatured` if `now >= maturity_date` (including unknown bonds)
    /// - `InvalidArgument` if `principal` is zero
    /// - `ArithmeticOverflow` if interest or any new balance exceeds 256 bits
    pub fn prepare_purchase(
        &self,
        buyer: Address,
        bond_id: BondId,
        principal: U256,
        now: Timestamp,
    ) -> Result<PurchasePlan, LedgerError> {
        let bond = self.terms(bond_id);
        if bond.is_matured(now) {
            return Err(LedgerError::BondMatured {
                bond_id,
                maturity_date: bond.maturity_date,
                now,
            });
        }
        if principal.is_zero() {
            return Err(LedgerError::InvalidArgument(
                "principal amount must be positive".into(),
            ));
        }

        let interest = calculate_interest(principal, bond.interest_rate, bond.maturity_date, now)?;
        let total = principal
            .checked_add(interest)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let current = self.holding(bond_id, &buyer);
        let holding_after = Holding {
            principal_balance: current
                .principal_balance
                .checked_add(principal)
                .ok_or(LedgerError::ArithmeticOverflow)?,
            interest_accrued: current
                .interest_accrued
                .checked_add(interest)
                .ok_or(LedgerError::ArithmeticOverflow)?,
        };
        let total_issued_after = bond
            .total_issued
            .checked_add(total)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        Ok(PurchasePlan {
            bond_id,
            buyer,
            principal,
            interest,
            total,
            holding_after,
            total_issued_after,
        })
    }

    /// Apply a prepared purchase.
    pub fn commit_purchase(&mut self, plan: &PurchasePlan) {
        self.holdings
            .insert((plan.bond_id, plan.buyer), plan.holding_after);
        if let Ok(idx) = usize::try_from(plan.bond_id) {
            if let Some(bond) = self.bonds.get_mut(idx) {
                bond.total_issued = plan.total_issued_after;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Transfer
    // -------------------------------------------------------------------------

    /// Move `amount` principal from `from` to `to`. Accrued interest stays put.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a self-transfer or a zero amount
    /// - `InsufficientBalance` if `amount` exceeds the sender's principal
    /// - `ArithmeticOverflow` if the recipient balance would exceed 256 bits
    pub fn transfer(
        &mut self,
        from: Address,
        bond_id: BondId,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::InvalidArgument(
                "cannot transfer to self".into(),
            ));
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidArgument(
                "transfer amount must be positive".into(),
            ));
        }

        let mut sender = self.holding(bond_id, &from);
        if amount > sender.principal_balance {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: sender.principal_balance,
            });
        }

        let mut recipient = self.holding(bond_id, &to);
        recipient.principal_balance = recipient
            .principal_balance
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        sender.principal_balance -= amount;

        self.holdings.insert((bond_id, from), sender);
        self.holdings.insert((bond_id, to), recipient);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Redemption
    // -------------------------------------------------------------------------

    /// Validate a redemption and compute the payout.
    ///
    /// # Errors
    ///
    /// - `BondNotMatured` if `now < maturity_date`
    /// - `NothingToRedeem` if the holder has no principal
    /// - `ArithmeticOverflow` if principal plus interest exceeds 256 bits
    pub fn prepare_redemption(
        &self,
        holder: Address,
        bond_id: BondId,
        now: Timestamp,
    ) -> Result<RedemptionPlan, LedgerError> {
        let bond = self.terms(bond_id);
        if !bond.is_matured(now) {
            return Err(LedgerError::BondNotMatured {
                bond_id,
                maturity_date: bond.maturity_date,
                now,
            });
        }

        let holding = self.holding(bond_id, &holder);
        if holding.principal_balance.is_zero() {
            return Err(LedgerError::NothingToRedeem { bond_id, holder });
        }

        let payout = holding
            .principal_balance
            .checked_add(holding.interest_accrued)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        Ok(RedemptionPlan {
            bond_id,
            holder,
            principal: holding.principal_balance,
            interest: holding.interest_accrued,
            payout,
        })
    }

    /// Apply a prepared redemption: zero the holder's position, keep the record.
    pub fn commit_redemption(&mut self, plan: &RedemptionPlan) {
        self.holdings
            .insert((plan.bond_id, plan.holder), Holding::EMPTY);
    }
}

// =============================================================================
// TESTS
// =============================================================================
