//! Pending-forward queue.
//!
//! Entries live in transient storage and disappear at the cycle boundary, so
//! the queue never deletes anything itself.

use crate::{ForwardingError, Keeper};
use forwarding_store::PendingForwardStore;
use forwarding_types::ForwardingAccount;

/// Queue `account` unless it is already queued this cycle.
///
/// Storage failures are logged and swallowed; a missed entry is picked up by the
/// next deposit or an explicit clear.
pub(crate) fn queue_forward(transient: &dyn PendingForwardStore, account: &ForwardingAccount) {
    match transient.has_pending(account.address()) {
        Ok(true) => {}
        Ok(false) => {
            if let Err(e) = transient.put_pending(account.address(), account) {
                tracing::warn!(channel = %account.channel, error = %e, "failed to queue forward");
            }
        }
        Err(e) => {
            tracing::warn!(channel = %account.channel, error = %e, "failed to read pending forwards");
        }
    }
}

impl Keeper {
    pub fn set_pending_forward(&self, account: &ForwardingAccount) {
        queue_forward(self.transient.as_ref(), account);
    }

    /// Every account queued this cycle, one snapshot per address.
    pub fn pending_forwards(&self) -> Result<Vec<ForwardingAccount>, ForwardingError> {
        Ok(self.transient.iter_pending()?)
    }
}
