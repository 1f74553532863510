//! Allowed-denom key space.

use crate::StoreError;

/// A keyset of denoms permitted to be swept.
pub trait AllowedDenomStore: Send + Sync {
    /// All entries, in key order.
    fn allowed_denoms(&self) -> Result<Vec<String>, StoreError>;

    fn has_allowed_denom(&self, denom: &str) -> Result<bool, StoreError>;

    fn insert_allowed_denom(&self, denom: &str) -> Result<(), StoreError>;

    /// Remove every entry.
    fn clear_allowed_denoms(&self) -> Result<(), StoreError>;
}
