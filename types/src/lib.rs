//! Fundamental types for the forwarding module.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, coins, channel identifiers, credentials, and the account variants a
//! forwarding address can take.

pub mod account;
pub mod address;
pub mod channel;
pub mod coin;
pub mod denoms;
pub mod error;
pub mod keys;

pub use account::{Account, BaseAccount, Credential, ForwardingAccount, SignerlessKey};
pub use address::{Address, AddressCodec, ADDRESS_LEN};
pub use channel::{is_valid_channel_id, Channel, ChannelState, ClientState, TRANSFER_PORT};
pub use coin::{Coin, Coins};
pub use denoms::{validate_allowed_denoms, WILDCARD};
pub use error::TypesError;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};

/// Name of the module, used as the derivation domain separator and module account name.
pub const MODULE_NAME: &str = "forwarding";
