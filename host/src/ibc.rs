use crate::HostError;
use forwarding_messages::{Acknowledgement, MsgTransfer, Packet};
use forwarding_types::Address;

/// Sends outbound ICS-20 transfers.
pub trait TransferKeeper: Send + Sync {
    /// Submit a transfer, returning the packet sequence on success.
    fn transfer(&self, msg: &MsgTransfer) -> Result<u64, HostError>;
}

/// A packet handler in the receive path. Middleware wraps another `IbcModule`.
pub trait IbcModule: Send + Sync {
    fn on_recv_packet(&self, packet: &Packet, relayer: &Address) -> Acknowledgement;
}
