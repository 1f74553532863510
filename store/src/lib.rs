//! Abstract storage traits for the forwarding module.
//!
//! Every backend (a host chain's KV store, in-memory for testing) implements
//! these traits. The keeper depends only on the traits.
//!
//! Two stores are involved: the persistent one ([`ForwardingStore`]) and the
//! transient one ([`PendingForwardStore`]), which the host wipes at every
//! cycle boundary. Both can be branched through [`Revertible`] so a failed
//! transaction leaves no trace.

pub mod counters;
pub mod denoms;
pub mod error;
pub mod legacy;
pub mod meta;
pub mod pending;
pub mod snapshot;

pub use counters::CounterStore;
pub use denoms::AllowedDenomStore;
pub use error::StoreError;
pub use legacy::LegacyCounterStore;
pub use meta::MetaStore;
pub use pending::PendingForwardStore;
pub use snapshot::{Revertible, Snapshot};

/// Everything the keeper keeps in persistent storage.
pub trait ForwardingStore:
    AllowedDenomStore + CounterStore + MetaStore + LegacyCounterStore + Revertible
{
}

impl<T> ForwardingStore for T where
    T: AllowedDenomStore + CounterStore + MetaStore + LegacyCounterStore + Revertible
{
}
