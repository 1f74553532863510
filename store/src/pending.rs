//! Pending-forward key space.

use crate::{Revertible, StoreError};
use forwarding_types::{Address, ForwardingAccount};

/// Accounts queued for the end-of-cycle sweep.
///
/// Lives in transient storage. The host empties it between cycles; nothing in
/// this crate deletes individual entries.
pub trait PendingForwardStore: Revertible + Send + Sync {
    fn has_pending(&self, address: &Address) -> Result<bool, StoreError>;

    /// Store a snapshot under `address`. Overwrites.
    fn put_pending(&self, address: &Address, account: &ForwardingAccount) -> Result<(), StoreError>;

    /// All snapshots, in address order.
    fn iter_pending(&self) -> Result<Vec<ForwardingAccount>, StoreError>;

    /// Wipe the key space. Called by the host at commit.
    fn clear_pending(&self) -> Result<(), StoreError>;
}
