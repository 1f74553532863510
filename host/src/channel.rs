use forwarding_types::{Channel, ClientState};

/// Read access to channel ends.
pub trait ChannelKeeper: Send + Sync {
    fn get_channel(&self, port: &str, channel: &str) -> Option<Channel>;

    fn get_channel_client_state(&self, port: &str, channel: &str) -> Option<ClientState>;
}
