use crate::HostError;
use forwarding_store::Revertible;
use forwarding_types::{Address, Coins};

/// Hook run before every send. Receives `(from, to, amount)` and returns the
/// address the coins should actually land in, or an error to block the send.
pub type SendRestrictionFn =
    Box<dyn Fn(&Address, &Address, &Coins) -> Result<Address, HostError> + Send + Sync>;

/// Balance storage and coin movement.
///
/// Restoring a snapshot puts balances back. Registered restrictions are wiring,
/// not state, and stay installed.
pub trait BankKeeper: Revertible + Send + Sync {
    fn get_all_balances(&self, address: &Address) -> Coins;

    /// Move `amount` from `from` to `to`, running every registered restriction first.
    fn send_coins(&self, from: &Address, to: &Address, amount: &Coins) -> Result<(), HostError>;

    /// Register a restriction. Restrictions run in registration order.
    fn append_send_restriction(&self, restriction: SendRestrictionFn);
}
