//! Interfaces the forwarding module consumes from its host chain.
//!
//! The host owns account storage, balances, channels and outbound transfers.
//! The forwarding module only ever reaches them through these traits, so any
//! ledger (or the in-memory nullables) can sit behind them.

pub mod account;
pub mod bank;
pub mod channel;
pub mod error;
pub mod header;
pub mod ibc;

pub use account::AccountKeeper;
pub use bank::{BankKeeper, SendRestrictionFn};
pub use channel::ChannelKeeper;
pub use error::HostError;
pub use header::{Header, HeaderService};
pub use ibc::{IbcModule, TransferKeeper};
