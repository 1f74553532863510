//! Nullable account keeper.

use forwarding_host::AccountKeeper;
use forwarding_store::{Revertible, Snapshot, StoreError};
use forwarding_types::{Account, Address, BaseAccount};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory account objects with sequential account numbers.
pub struct NullAccountKeeper {
    accounts: Mutex<HashMap<Address, Account>>,
    next_number: Mutex<u64>,
}

impl NullAccountKeeper {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            next_number: Mutex::new(0),
        }
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

impl Default for NullAccountKeeper {
    fn default() -> Self {
        Self::new()
    }
}

impl Revertible for NullAccountKeeper {
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let accounts = self.accounts.lock().unwrap().clone();
        let next_number = *self.next_number.lock().unwrap();
        Ok(Snapshot::new((accounts, next_number)))
    }

    fn restore(&self, snapshot: Snapshot) -> Result<(), StoreError> {
        let (accounts, next_number): (HashMap<Address, Account>, u64) = snapshot.into_state()?;
        *self.accounts.lock().unwrap() = accounts;
        *self.next_number.lock().unwrap() = next_number;
        Ok(())
    }
}

impl AccountKeeper for NullAccountKeeper {
    fn get_account(&self, address: &Address) -> Option<Account> {
        self.accounts.lock().unwrap().get(address).cloned()
    }

    fn new_account_with_address(&self, address: &Address) -> Account {
        let mut next = self.next_number.lock().unwrap();
        let number = *next;
        *next += 1;
        Account::Base(BaseAccount::new(*address, number))
    }

    fn set_account(&self, account: Account) {
        self.accounts
            .lock()
            .unwrap()
            .insert(*account.address(), account);
    }
}
