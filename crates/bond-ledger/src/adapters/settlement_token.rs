//! # In-Memory Settlement Token
//!
//! A fungible token with balances and allowances, standing in for an
//! external token contract. The ledger's custody account receives every
//! purchase and funds every redemption.
//!
//! `transfer_in` behaves like `transferFrom(payer, custody, amount)`: it
//! consumes allowance the payer granted to the custody account.

use crate::domain::value_objects::{Address, U256};
use crate::errors::GatewayError;
use crate::ports::outbound::SettlementGateway;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Debug, Default)]
struct TokenBook {
    balances: HashMap<Address, U256>,
    /// (owner, spender) -> remaining allowance
    allowances: HashMap<(Address, Address), U256>,
}

impl TokenBook {
    fn balance(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn credit(&mut self, account: Address, amount: U256) -> Result<(), GatewayError> {
        let next = self
            .balance(&account)
            .checked_add(amount)
            .ok_or_else(|| GatewayError::Unavailable("token balance overflow".into()))?;
        self.balances.insert(account, next);
        Ok(())
    }

    /// Move `amount` between accounts. The caller has checked `from` covers it.
    fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> Result<(), GatewayError> {
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance(&to)
            .checked_add(amount)
            .ok_or_else(|| GatewayError::Unavailable("token balance overflow".into()))?;
        let from_balance = self.balance(&from) - amount;
        self.balances.insert(from, from_balance);
        self.balances.insert(to, to_balance);
        Ok(())
    }
}

/// Token ledger kept in process memory.
#[derive(Debug)]
pub struct InMemorySettlementToken {
    token: Address,
    custody: Address,
    book: RwLock<TokenBook>,
    offline: AtomicBool,
}

impl InMemorySettlementToken {
    /// New token at `token` whose custody account is `custody`.
    #[must_use]
    pub fn new(token: Address, custody: Address) -> Self {
        Self {
            token,
            custody,
            book: RwLock::new(TokenBook::default()),
            offline: AtomicBool::new(false),
        }
    }

    /// Token identity.
    #[must_use]
    pub fn token(&self) -> Address {
        self.token
    }

    /// Account holding funds on behalf of the ledger.
    #[must_use]
    pub fn custody_account(&self) -> Address {
        self.custody
    }

    /// Create `amount` tokens in `account`.
    ///
    /// # Errors
    ///
    /// `GatewayError::Unavailable` if the balance would overflow.
    pub fn mint(&self, account: Address, amount: U256) -> Result<(), GatewayError> {
        self.book.write().credit(account, amount)
    }

    /// Let the custody account pull up to `amount` from `owner`.
    pub fn approve(&self, owner: Address, amount: U256) {
        self.book
            .write()
            .allowances
            .insert((owner, self.custody), amount);
    }

    /// Balance of `account`.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.book.read().balance(account)
    }

    /// Allowance `owner` granted to the custody account.
    #[must_use]
    pub fn allowance(&self, owner: &Address) -> U256 {
        self.book.read().allowance(owner, &self.custody)
    }

    /// Funds held by the ledger.
    #[must_use]
    pub fn custody_balance(&self) -> U256 {
        self.balance_of(&self.custody)
    }

    /// Make every subsequent call fail with `Unavailable` until cleared.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), GatewayError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable(format!(
                "token {} offline",
                self.token
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SettlementGateway for InMemorySettlementToken {
    async fn transfer_in(&self, from: Address, amount: U256) -> Result<(), GatewayError> {
        self.ensure_online()?;
        let mut book = self.book.write();

        let approved = book.allowance(&from, &self.custody);
        if approved < amount {
            return Err(GatewayError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }
        let available = book.balance(&from);
        if available < amount {
            return Err(GatewayError::InsufficientFunds {
                account: from,
                required: amount,
                available,
            });
        }

        book.move_balance(from, self.custody, amount)?;
        book.allowances
            .insert((from, self.custody), approved - amount);

        debug!(from = %from, amount = %amount, "Settlement pulled into custody");
        Ok(())
    }

    async fn transfer_out(&self, to: Address, amount: U256) -> Result<(), GatewayError> {
        self.ensure_online()?;
        let mut book = self.book.write();

        let available = book.balance(&self.custody);
        if available < amount {
            return Err(GatewayError::InsufficientCustody {
                required: amount,
                available,
            });
        }

        book.move_balance(self.custody, to, amount)?;

        debug!(to = %to, amount = %amount, "Settlement paid out of custody");
        Ok(())
    }
}
