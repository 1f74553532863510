//! The v1 counter layout.
//!
//! Version 1 stored both per-channel counters as decimal strings. Only the
//! migration reads it.

use crate::StoreError;

pub trait LegacyCounterStore: Send + Sync {
    fn legacy_num_of_accounts(&self) -> Result<Vec<(String, String)>, StoreError>;

    fn legacy_num_of_forwards(&self) -> Result<Vec<(String, String)>, StoreError>;
}
