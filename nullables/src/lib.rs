//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! Every host collaborator (storage, accounts, balances, channels, transfers,
//! block header) is abstracted behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod accounts;
pub mod bank;
pub mod channels;
pub mod clock;
pub mod store;
pub mod transfer;

pub use accounts::NullAccountKeeper;
pub use bank::NullBank;
pub use channels::NullChannelKeeper;
pub use clock::NullHeader;
pub use store::{NullStore, NullTransientStore};
pub use transfer::{NullTransfer, NullTransferModule, SentTransfer};
