//! Forwarding host assembly.
//!
//! [`ForwardingApp`] is where the pieces meet:
//! - the keeper, with its deposit hook installed on the bank
//! - the authentication chain in front of every transaction
//! - the packet middleware in front of the transfer application
//! - the end-of-cycle sweep and the commit that empties the per-cycle queue

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::{AppServices, ForwardingApp, MsgResponse};
pub use config::ForwardingConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
