use forwarding_store::Revertible;
use forwarding_types::{Account, Address};

/// Account object storage.
pub trait AccountKeeper: Revertible + Send + Sync {
    fn get_account(&self, address: &Address) -> Option<Account>;

    fn has_account(&self, address: &Address) -> bool {
        self.get_account(address).is_some()
    }

    /// Build (but do not store) a fresh base account with the next account number.
    fn new_account_with_address(&self, address: &Address) -> Account;

    fn set_account(&self, account: Account);
}
