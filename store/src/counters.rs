//! Per-channel statistics.

use crate::StoreError;

/// Per-channel counters and cumulative forwarded amounts.
///
/// Missing keys read as zero (counters) or `None` (totals). Totals are kept in
/// their string form, e.g. `"1000000uusdc,5uatom"`.
pub trait CounterStore: Send + Sync {
    fn num_of_accounts(&self, channel: &str) -> Result<u64, StoreError>;

    fn set_num_of_accounts(&self, channel: &str, value: u64) -> Result<(), StoreError>;

    /// Every channel with an account counter, in key order.
    fn iter_num_of_accounts(&self) -> Result<Vec<(String, u64)>, StoreError>;

    fn num_of_forwards(&self, channel: &str) -> Result<u64, StoreError>;

    fn set_num_of_forwards(&self, channel: &str, value: u64) -> Result<(), StoreError>;

    fn iter_num_of_forwards(&self) -> Result<Vec<(String, u64)>, StoreError>;

    fn total_forwarded(&self, channel: &str) -> Result<Option<String>, StoreError>;

    fn set_total_forwarded(&self, channel: &str, coins: &str) -> Result<(), StoreError>;

    fn iter_total_forwarded(&self) -> Result<Vec<(String, String)>, StoreError>;
}
