//! Outbound cross-chain transfer.

use forwarding_types::Coin;
use serde::{Deserialize, Serialize};

/// Transfer of a single asset over a channel.
///
/// The sweep always sets `timeout_height` to zero and relies on
/// `timeout_timestamp` (unix nanos).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTransfer {
    pub source_port: String,
    pub source_channel: String,
    pub token: Coin,
    pub sender: String,
    pub receiver: String,
    pub timeout_height: u64,
    pub timeout_timestamp: u64,
    pub memo: String,
}
