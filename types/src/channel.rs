//! Transport channel identifiers and lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Port every forwarding channel is bound to.
pub const TRANSFER_PORT: &str = "transfer";

const CHANNEL_PREFIX: &str = "channel-";

/// Check that `id` is a syntactically valid channel identifier (`channel-<u64>`).
///
/// This says nothing about whether the channel exists or is open.
pub fn is_valid_channel_id(id: &str) -> bool {
    if !(8..=64).contains(&id.len()) {
        return false;
    }
    let Some(sequence) = id.strip_prefix(CHANNEL_PREFIX) else {
        return false;
    };
    !sequence.is_empty()
        && sequence.bytes().all(|b| b.is_ascii_digit())
        && sequence.parse::<u64>().is_ok()
}

/// Lifecycle state of a channel as reported by the transport collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelState {
    Uninitialized,
    Init,
    TryOpen,
    Open,
    Closed,
    Flushing,
    FlushComplete,
}

impl ChannelState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "STATE_UNINITIALIZED_UNSPECIFIED",
            Self::Init => "STATE_INIT",
            Self::TryOpen => "STATE_TRYOPEN",
            Self::Open => "STATE_OPEN",
            Self::Closed => "STATE_CLOSED",
            Self::Flushing => "STATE_FLUSHING",
            Self::FlushComplete => "STATE_FLUSHCOMPLETE",
        };
        f.write_str(s)
    }
}

/// The subset of a channel end the forwarding module cares about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub state: ChannelState,
    pub counterparty_channel: String,
}

/// Light-client state backing a channel's connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientState {
    /// A client that tracks a chain with a known chain id.
    Tendermint { chain_id: String },
    /// Any other client type.
    Other,
}

impl ClientState {
    /// Chain id of the counterparty, or `UNKNOWN` for client types that do not carry one.
    pub fn chain_id(&self) -> String {
        match self {
            Self::Tendermint { chain_id } => chain_id.clone(),
            Self::Other => "UNKNOWN".to_string(),
        }
    }
}
