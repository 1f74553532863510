//! Nullable stores: thread-safe in-memory storage for testing.

use forwarding_store::{
    AllowedDenomStore, CounterStore, LegacyCounterStore, MetaStore, PendingForwardStore,
    Revertible, Snapshot, StoreError,
};
use forwarding_types::{Address, ForwardingAccount};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// In-memory persistent store: allowed denoms, counters, totals, metadata and
/// the v1 counter layout.
pub struct NullStore {
    allowed_denoms: Mutex<BTreeSet<String>>,
    num_of_accounts: Mutex<BTreeMap<String, u64>>,
    num_of_forwards: Mutex<BTreeMap<String, u64>>,
    total_forwarded: Mutex<BTreeMap<String, String>>,
    schema_version: Mutex<Option<u32>>,
    legacy_accounts: Mutex<BTreeMap<String, String>>,
    legacy_forwards: Mutex<BTreeMap<String, String>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            allowed_denoms: Mutex::new(BTreeSet::new()),
            num_of_accounts: Mutex::new(BTreeMap::new()),
            num_of_forwards: Mutex::new(BTreeMap::new()),
            total_forwarded: Mutex::new(BTreeMap::new()),
            schema_version: Mutex::new(None),
            legacy_accounts: Mutex::new(BTreeMap::new()),
            legacy_forwards: Mutex::new(BTreeMap::new()),
        }
    }

    /// Seed the v1 layout, as a store written before the migration would look.
    pub fn with_legacy_counters(
        accounts: &[(&str, &str)],
        forwards: &[(&str, &str)],
    ) -> Self {
        let store = Self::new();
        {
            let mut legacy = store.legacy_accounts.lock().unwrap();
            for (channel, value) in accounts {
                legacy.insert(channel.to_string(), value.to_string());
            }
        }
        {
            let mut legacy = store.legacy_forwards.lock().unwrap();
            for (channel, value) in forwards {
                legacy.insert(channel.to_string(), value.to_string());
            }
        }
        store
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a [`NullStore`] holds, captured at once.
struct NullStoreState {
    allowed_denoms: BTreeSet<String>,
    num_of_accounts: BTreeMap<String, u64>,
    num_of_forwards: BTreeMap<String, u64>,
    total_forwarded: BTreeMap<String, String>,
    schema_version: Option<u32>,
    legacy_accounts: BTreeMap<String, String>,
    legacy_forwards: BTreeMap<String, String>,
}

impl Revertible for NullStore {
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::new(NullStoreState {
            allowed_denoms: self.allowed_denoms.lock().unwrap().clone(),
            num_of_accounts: self.num_of_accounts.lock().unwrap().clone(),
            num_of_forwards: self.num_of_forwards.lock().unwrap().clone(),
            total_forwarded: self.total_forwarded.lock().unwrap().clone(),
            schema_version: *self.schema_version.lock().unwrap(),
            legacy_accounts: self.legacy_accounts.lock().unwrap().clone(),
            legacy_forwards: self.legacy_forwards.lock().unwrap().clone(),
        }))
    }

    fn restore(&self, snapshot: Snapshot) -> Result<(), StoreError> {
        let state: NullStoreState = snapshot.into_state()?;
        *self.allowed_denoms.lock().unwrap() = state.allowed_denoms;
        *self.num_of_accounts.lock().unwrap() = state.num_of_accounts;
        *self.num_of_forwards.lock().unwrap() = state.num_of_forwards;
        *self.total_forwarded.lock().unwrap() = state.total_forwarded;
        *self.schema_version.lock().unwrap() = state.schema_version;
        *self.legacy_accounts.lock().unwrap() = state.legacy_accounts;
        *self.legacy_forwards.lock().unwrap() = state.legacy_forwards;
        Ok(())
    }
}

impl AllowedDenomStore for NullStore {
    fn allowed_denoms(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.allowed_denoms.lock().unwrap().iter().cloned().collect())
    }

    fn has_allowed_denom(&self, denom: &str) -> Result<bool, StoreError> {
        Ok(self.allowed_denoms.lock().unwrap().contains(denom))
    }

    fn insert_allowed_denom(&self, denom: &str) -> Result<(), StoreError> {
        self.allowed_denoms.lock().unwrap().insert(denom.to_string());
        Ok(())
    }

    fn clear_allowed_denoms(&self) -> Result<(), StoreError> {
        self.allowed_denoms.lock().unwrap().clear();
        Ok(())
    }
}

impl CounterStore for NullStore {
    fn num_of_accounts(&self, channel: &str) -> Result<u64, StoreError> {
        Ok(self
            .num_of_accounts
            .lock()
            .unwrap()
            .get(channel)
            .copied()
            .unwrap_or(0))
    }

    fn set_num_of_accounts(&self, channel: &str, value: u64) -> Result<(), StoreError> {
        self.num_of_accounts
            .lock()
            .unwrap()
            .insert(channel.to_string(), value);
        Ok(())
    }

    fn iter_num_of_accounts(&self) -> Result<Vec<(String, u64)>, StoreError> {
        Ok(self
            .num_of_accounts
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }

    fn num_of_forwards(&self, channel: &str) -> Result<u64, StoreError> {
        Ok(self
            .num_of_forwards
            .lock()
            .unwrap()
            .get(channel)
            .copied()
            .unwrap_or(0))
    }

    fn set_num_of_forwards(&self, channel: &str, value: u64) -> Result<(), StoreError> {
        self.num_of_forwards
            .lock()
            .unwrap()
            .insert(channel.to_string(), value);
        Ok(())
    }

    fn iter_num_of_forwards(&self) -> Result<Vec<(String, u64)>, StoreError> {
        Ok(self
            .num_of_forwards
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }

    fn total_forwarded(&self, channel: &str) -> Result<Option<String>, StoreError> {
        Ok(self.total_forwarded.lock().unwrap().get(channel).cloned())
    }

    fn set_total_forwarded(&self, channel: &str, coins: &str) -> Result<(), StoreError> {
        self.total_forwarded
            .lock()
            .unwrap()
            .insert(channel.to_string(), coins.to_string());
        Ok(())
    }

    fn iter_total_forwarded(&self) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self
            .total_forwarded
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl MetaStore for NullStore {
    fn schema_version(&self) -> Result<u32, StoreError> {
        Ok(self.schema_version.lock().unwrap().unwrap_or(1))
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        *self.schema_version.lock().unwrap() = Some(version);
        Ok(())
    }
}

impl LegacyCounterStore for NullStore {
    fn legacy_num_of_accounts(&self) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self
            .legacy_accounts
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn legacy_num_of_forwards(&self) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self
            .legacy_forwards
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// In-memory transient store. Values are kept encoded, as a real KV backend would.
pub struct NullTransientStore {
    pending: Mutex<BTreeMap<Address, Vec<u8>>>,
}

impl NullTransientStore {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

impl Default for NullTransientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Revertible for NullTransientStore {
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::new(self.pending.lock().unwrap().clone()))
    }

    fn restore(&self, snapshot: Snapshot) -> Result<(), StoreError> {
        *self.pending.lock().unwrap() = snapshot.into_state()?;
        Ok(())
    }
}

impl PendingForwardStore for NullTransientStore {
    fn has_pending(&self, address: &Address) -> Result<bool, StoreError> {
        Ok(self.pending.lock().unwrap().contains_key(address))
    }

    fn put_pending(&self, address: &Address, account: &ForwardingAccount) -> Result<(), StoreError> {
        let bytes =
            bincode::serialize(account).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.pending.lock().unwrap().insert(*address, bytes);
        Ok(())
    }

    fn iter_pending(&self) -> Result<Vec<ForwardingAccount>, StoreError> {
        self.pending
            .lock()
            .unwrap()
            .values()
            .map(|bytes| {
                bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
            })
            .collect()
    }

    fn clear_pending(&self) -> Result<(), StoreError> {
        self.pending.lock().unwrap().clear();
        Ok(())
    }
}
