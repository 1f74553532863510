//! Genesis import and export.

use crate::migrations::CONSENSUS_VERSION;
use crate::{ForwardingError, Keeper};
use forwarding_types::{is_valid_channel_id, validate_allowed_denoms, Coins, WILDCARD};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisState {
    pub allowed_denoms: Vec<String>,
    pub num_of_accounts: BTreeMap<String, u64>,
    pub num_of_forwards: BTreeMap<String, u64>,
    pub total_forwarded: BTreeMap<String, String>,
}

impl Default for GenesisState {
    /// Every denom allowed, no statistics.
    fn default() -> Self {
        Self {
            allowed_denoms: vec![WILDCARD.to_string()],
            num_of_accounts: BTreeMap::new(),
            num_of_forwards: BTreeMap::new(),
            total_forwarded: BTreeMap::new(),
        }
    }
}

impl GenesisState {
    pub fn validate(&self) -> Result<(), ForwardingError> {
        validate_allowed_denoms(&self.allowed_denoms)?;

        let channels = self
            .num_of_accounts
            .keys()
            .chain(self.num_of_forwards.keys())
            .chain(self.total_forwarded.keys());
        for channel in channels {
            if !is_valid_channel_id(channel) {
                return Err(ForwardingError::InvalidGenesis(format!(
                    "invalid channel {channel}"
                )));
            }
        }

        for total in self.total_forwarded.values() {
            if total.parse::<Coins>().is_err() {
                return Err(ForwardingError::InvalidGenesis(format!(
                    "invalid coins {total}"
                )));
            }
        }

        Ok(())
    }
}

impl Keeper {
    /// Import `genesis`. Nothing is written unless it validates.
    pub fn init_genesis(&self, genesis: &GenesisState) -> Result<(), ForwardingError> {
        genesis.validate()?;
        for denom in &genesis.allowed_denoms {
            self.store.insert_allowed_denom(denom)?;
        }
        for (channel, count) in &genesis.num_of_accounts {
            self.store.set_num_of_accounts(channel, *count)?;
        }
        for (channel, count) in &genesis.num_of_forwards {
            self.store.set_num_of_forwards(channel, *count)?;
        }
        for (channel, total) in &genesis.total_forwarded {
            self.store.set_total_forwarded(channel, total)?;
        }
        self.store.set_schema_version(CONSENSUS_VERSION)?;
        Ok(())
    }

    pub fn export_genesis(&self) -> Result<GenesisState, ForwardingError> {
        Ok(GenesisState {
            allowed_denoms: self.allowed_denoms()?,
            num_of_accounts: self.all_num_of_accounts()?,
            num_of_forwards: self.all_num_of_forwards()?,
            total_forwarded: self.all_total_forwarded()?,
        })
    }
}
