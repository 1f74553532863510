//! State and handlers of the forwarding module.
//!
//! The [`Keeper`] owns the persistent key spaces (allowed denoms, per-channel
//! counters and totals), the transient pending-forward queue, and handles to
//! every host collaborator. Its operations are split by concern:
//!
//! - [`msg_server`]: `register_account`, `clear_account`, `set_allowed_denoms`
//! - [`sweep`]: `execute_forwards`, the end-of-cycle hook
//! - [`query_server`]: address derivation and statistics
//! - [`genesis`] and [`migrations`]: state import/export and schema upgrades

pub mod error;
pub mod events;
pub mod genesis;
pub mod keeper;
pub mod migrations;
pub mod msg_server;
pub mod pending;
pub mod query_server;
pub mod state;
pub mod sweep;

#[cfg(test)]
mod testutil;

pub use error::ForwardingError;
pub use events::{EventBus, ForwardingEvent};
pub use genesis::GenesisState;
pub use keeper::{HostServices, Keeper, DEFAULT_PACKET_TIMEOUT_NANOS};
pub use migrations::{Migrator, CONSENSUS_VERSION};
pub use msg_server::validate_account_fields;
pub use query_server::{AddressResponse, DenomsResponse, Stats, StatsByChannelResponse, StatsResponse};
