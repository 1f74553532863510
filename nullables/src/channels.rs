//! Nullable channel keeper.

use forwarding_host::ChannelKeeper;
use forwarding_types::{Channel, ChannelState, ClientState};
use std::collections::HashMap;
use std::sync::Mutex;

/// Channels on the `transfer` port, set up by the test.
pub struct NullChannelKeeper {
    channels: Mutex<HashMap<String, (Channel, ClientState)>>,
}

impl NullChannelKeeper {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Add an open channel whose counterparty is `chain_id`.
    pub fn open(&self, channel: &str, chain_id: &str) {
        self.insert(
            channel,
            ChannelState::Open,
            ClientState::Tendermint {
                chain_id: chain_id.to_string(),
            },
        );
    }

    pub fn insert(&self, channel: &str, state: ChannelState, client: ClientState) {
        let end = Channel {
            state,
            counterparty_channel: channel.to_string(),
        };
        self.channels
            .lock()
            .unwrap()
            .insert(channel.to_string(), (end, client));
    }

    pub fn set_state(&self, channel: &str, state: ChannelState) {
        if let Some((end, _)) = self.channels.lock().unwrap().get_mut(channel) {
            end.state = state;
        }
    }
}

impl Default for NullChannelKeeper {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelKeeper for NullChannelKeeper {
    fn get_channel(&self, _port: &str, channel: &str) -> Option<Channel> {
        self.channels
            .lock()
            .unwrap()
            .get(channel)
            .map(|(end, _)| end.clone())
    }

    fn get_channel_client_state(&self, _port: &str, channel: &str) -> Option<ClientState> {
        self.channels
            .lock()
            .unwrap()
            .get(channel)
            .map(|(_, client)| client.clone())
    }
}
