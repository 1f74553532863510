//! Metadata storage trait.

use crate::StoreError;

/// Bookkeeping that doesn't belong to any domain key space.
pub trait MetaStore: Send + Sync {
    /// Current schema version. A store that never recorded one reports `1`.
    fn schema_version(&self) -> Result<u32, StoreError>;

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError>;
}
