//! Nullable bank: balances and coin movement in memory.

use forwarding_host::{AccountKeeper, BankKeeper, HostError, SendRestrictionFn};
use forwarding_store::{Revertible, Snapshot, StoreError};
use forwarding_types::{Address, Coins};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory balances.
///
/// When built with [`NullBank::with_accounts`], crediting an address that has no
/// account object creates one, as a real bank does.
pub struct NullBank {
    balances: Mutex<HashMap<Address, Coins>>,
    restrictions: Mutex<Vec<SendRestrictionFn>>,
    accounts: Option<Arc<dyn AccountKeeper>>,
}

impl NullBank {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            restrictions: Mutex::new(Vec::new()),
            accounts: None,
        }
    }

    pub fn with_accounts(accounts: Arc<dyn AccountKeeper>) -> Self {
        Self {
            accounts: Some(accounts),
            ..Self::new()
        }
    }

    /// Create coins out of thin air. Bypasses send restrictions.
    pub fn mint(&self, to: &Address, amount: &Coins) {
        self.balances
            .lock()
            .unwrap()
            .entry(*to)
            .or_default()
            .add(amount);
        self.ensure_account(to);
    }

    fn ensure_account(&self, address: &Address) {
        if let Some(accounts) = &self.accounts {
            if !accounts.has_account(address) {
                accounts.set_account(accounts.new_account_with_address(address));
            }
        }
    }

    fn apply_restrictions(
        &self,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<Address, HostError> {
        let restrictions = self.restrictions.lock().unwrap();
        let mut target = *to;
        for restriction in restrictions.iter() {
            target = restriction(from, &target, amount)?;
        }
        Ok(target)
    }
}

impl Default for NullBank {
    fn default() -> Self {
        Self::new()
    }
}

impl Revertible for NullBank {
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::new(self.balances.lock().unwrap().clone()))
    }

    fn restore(&self, snapshot: Snapshot) -> Result<(), StoreError> {
        *self.balances.lock().unwrap() = snapshot.into_state()?;
        Ok(())
    }
}

impl BankKeeper for NullBank {
    fn get_all_balances(&self, address: &Address) -> Coins {
        self.balances
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    fn send_coins(&self, from: &Address, to: &Address, amount: &Coins) -> Result<(), HostError> {
        let to = self.apply_restrictions(from, to, amount)?;

        let mut balances = self.balances.lock().unwrap();
        let current = balances.get(from).cloned().unwrap_or_default();
        let remaining = current
            .checked_sub(amount)
            .ok_or_else(|| HostError::InsufficientFunds(format!("{current} < {amount}")))?;
        balances.insert(*from, remaining);
        balances.entry(to).or_default().add(amount);
        drop(balances);

        self.ensure_account(&to);
        Ok(())
    }

    fn append_send_restriction(&self, restriction: SendRestrictionFn) {
        self.restrictions.lock().unwrap().push(restriction);
    }
}
