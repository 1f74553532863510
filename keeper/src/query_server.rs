//! Read-only queries.

use crate::{ForwardingError, Keeper};
use forwarding_crypto::forwarding_address;
use forwarding_types::{Account, ClientState, Coins, TRANSFER_PORT};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddressResponse {
    pub address: String,
    /// True only if a forwarding account is registered at `address`.
    pub exists: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DenomsResponse {
    pub allowed_denoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub chain_id: String,
    pub num_of_accounts: u64,
    pub num_of_forwards: u64,
    pub total_forwarded: Coins,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatsResponse {
    pub stats: BTreeMap<String, Stats>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatsByChannelResponse {
    pub num_of_accounts: u64,
    pub num_of_forwards: u64,
    pub total_forwarded: Coins,
}

impl Keeper {
    pub fn query_address(
        &self,
        channel: &str,
        recipient: &str,
        fallback: &str,
    ) -> Result<AddressResponse, ForwardingError> {
        if !fallback.is_empty() && self.host.codec.decode(fallback).is_err() {
            return Err(ForwardingError::InvalidFallback);
        }

        let address = forwarding_address(channel, recipient, fallback);
        let exists = matches!(
            self.host.accounts.get_account(&address),
            Some(Account::Forwarding(_))
        );
        Ok(AddressResponse {
            address: self.host.codec.encode(&address),
            exists,
        })
    }

    pub fn query_denoms(&self) -> Result<DenomsResponse, ForwardingError> {
        Ok(DenomsResponse {
            allowed_denoms: self.allowed_denoms()?,
        })
    }

    /// Statistics for every channel that has had an account registered on it.
    pub fn query_stats(&self) -> Result<StatsResponse, ForwardingError> {
        let mut stats = BTreeMap::new();
        for (channel, num_of_accounts) in self.all_num_of_accounts()? {
            let chain_id = self
                .host
                .channels
                .get_channel_client_state(TRANSFER_PORT, &channel)
                .unwrap_or(ClientState::Other)
                .chain_id();
            let entry = Stats {
                chain_id,
                num_of_accounts,
                num_of_forwards: self.num_of_forwards(&channel)?,
                total_forwarded: self.total_forwarded(&channel)?,
            };
            stats.insert(channel, entry);
        }
        Ok(StatsResponse { stats })
    }

    pub fn query_stats_by_channel(
        &self,
        channel: &str,
    ) -> Result<StatsByChannelResponse, ForwardingError> {
        Ok(StatsByChannelResponse {
            num_of_accounts: self.num_of_accounts(channel)?,
            num_of_forwards: self.num_of_forwards(channel)?,
            total_forwarded: self.total_forwarded(channel)?,
        })
    }
}
