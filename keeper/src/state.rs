//! Accessors over the persistent key spaces.

use crate::{ForwardingError, Keeper};
use forwarding_types::{Coin, Coins};
use std::collections::BTreeMap;

impl Keeper {
    pub fn allowed_denoms(&self) -> Result<Vec<String>, ForwardingError> {
        Ok(self.store.allowed_denoms()?)
    }

    pub fn num_of_accounts(&self, channel: &str) -> Result<u64, ForwardingError> {
        Ok(self.store.num_of_accounts(channel)?)
    }

    pub fn num_of_forwards(&self, channel: &str) -> Result<u64, ForwardingError> {
        Ok(self.store.num_of_forwards(channel)?)
    }

    pub fn all_num_of_accounts(&self) -> Result<BTreeMap<String, u64>, ForwardingError> {
        Ok(self.store.iter_num_of_accounts()?.into_iter().collect())
    }

    pub fn all_num_of_forwards(&self) -> Result<BTreeMap<String, u64>, ForwardingError> {
        Ok(self.store.iter_num_of_forwards()?.into_iter().collect())
    }

    pub fn all_total_forwarded(&self) -> Result<BTreeMap<String, String>, ForwardingError> {
        Ok(self.store.iter_total_forwarded()?.into_iter().collect())
    }

    /// Cumulative amount forwarded over `channel`. An unparseable stored value
    /// reads as empty.
    pub fn total_forwarded(&self, channel: &str) -> Result<Coins, ForwardingError> {
        let raw = self.store.total_forwarded(channel)?.unwrap_or_default();
        Ok(raw.parse().unwrap_or_default())
    }

    pub(crate) fn increment_num_of_accounts(&self, channel: &str) -> Result<(), ForwardingError> {
        let count = self.store.num_of_accounts(channel)?;
        self.store
            .set_num_of_accounts(channel, count.saturating_add(1))?;
        tracing::info!(channel, "registered a new account");
        Ok(())
    }

    pub(crate) fn increment_num_of_forwards(&self, channel: &str) -> Result<(), ForwardingError> {
        let count = self.store.num_of_forwards(channel)?;
        self.store
            .set_num_of_forwards(channel, count.saturating_add(1))?;
        Ok(())
    }

    pub(crate) fn increment_total_forwarded(
        &self,
        channel: &str,
        coin: &Coin,
    ) -> Result<(), ForwardingError> {
        let mut total = self.total_forwarded(channel)?;
        total.add_coin(coin.clone());
        self.store
            .set_total_forwarded(channel, &total.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::TestEnv;
    use forwarding_store::CounterStore;
    use forwarding_types::Coin;

    #[test]
    fn totals_accumulate_per_denom() {
        let env = TestEnv::new();
        env.keeper
            .increment_total_forwarded("channel-0", &Coin::new(5, "uusdc"))
            .unwrap();
        env.keeper
            .increment_total_forwarded("channel-0", &Coin::new(7, "uusdc"))
            .unwrap();
        env.keeper
            .increment_total_forwarded("channel-0", &Coin::new(1, "uatom"))
            .unwrap();
        assert_eq!(
            env.store.total_forwarded("channel-0").unwrap().as_deref(),
            Some("1uatom,12uusdc")
        );
    }

    #[test]
    fn garbage_total_reads_as_empty() {
        let env = TestEnv::new();
        env.store.set_total_forwarded("channel-0", "not coins").unwrap();
        assert!(env.keeper.total_forwarded("channel-0").unwrap().is_zero());
    }

    #[test]
    fn counters_are_per_channel() {
        let env = TestEnv::new();
        env.keeper.increment_num_of_forwards("channel-0").unwrap();
        env.keeper.increment_num_of_forwards("channel-0").unwrap();
        env.keeper.increment_num_of_forwards("channel-1").unwrap();
        assert_eq!(env.keeper.num_of_forwards("channel-0").unwrap(), 2);
        assert_eq!(env.keeper.num_of_forwards("channel-1").unwrap(), 1);
        assert_eq!(env.keeper.num_of_forwards("channel-2").unwrap(), 0);
    }
}
