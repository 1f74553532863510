//! Store migrations.

use crate::{ForwardingError, Keeper};
use forwarding_types::WILDCARD;

/// Current schema version of the persistent store.
pub const CONSENSUS_VERSION: u32 = 2;

pub struct Migrator<'a> {
    keeper: &'a Keeper,
}

impl<'a> Migrator<'a> {
    pub fn new(keeper: &'a Keeper) -> Self {
        Self { keeper }
    }

    /// Bring the store up to [`CONSENSUS_VERSION`]. Returns the version it ended at.
    pub fn run(&self) -> Result<u32, ForwardingError> {
        let version = self.keeper.store.schema_version()?;
        if version < 2 {
            self.migrate_1_to_2()?;
        }
        Ok(self.keeper.store.schema_version()?)
    }

    /// v2 introduced the allowed-denom set and binary counters.
    ///
    /// Seeds the wildcard and copies the v1 decimal counters over. Unparseable v1
    /// values become zero.
    pub fn migrate_1_to_2(&self) -> Result<(), ForwardingError> {
        let store = &self.keeper.store;
        store.insert_allowed_denom(WILDCARD)?;

        for (channel, raw) in store.legacy_num_of_accounts()? {
            store.set_num_of_accounts(&channel, raw.parse().unwrap_or(0))?;
        }
        for (channel, raw) in store.legacy_num_of_forwards()? {
            store.set_num_of_forwards(&channel, raw.parse().unwrap_or(0))?;
        }

        store.set_schema_version(2)?;
        tracing::info!("migrated forwarding store from v1 to v2");
        Ok(())
    }
}
