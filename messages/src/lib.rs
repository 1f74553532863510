//! Message types for the forwarding module.
//!
//! - [`msgs`]: the three message-style operations and their responses
//! - [`tx`]: the transaction envelope the auth pipeline inspects
//! - [`packet`]: inbound packet payloads and acknowledgements
//! - [`transfer`]: the outbound transfer issued by the sweep

pub mod msgs;
pub mod packet;
pub mod transfer;
pub mod tx;

pub use msgs::{
    Msg, MsgClearAccount, MsgClearAccountResponse, MsgRegisterAccount, MsgRegisterAccountResponse,
    MsgSend, MsgSetAllowedDenoms, MsgSetAllowedDenomsResponse,
};
pub use packet::{
    Acknowledgement, ForwardingDirective, FungibleTokenPacketData, Packet, RegisterAccountData,
};
pub use transfer::MsgTransfer;
pub use tx::{SignDoc, SignatureV2, Tx};
