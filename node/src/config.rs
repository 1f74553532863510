//! Module configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use forwarding_keeper::DEFAULT_PACKET_TIMEOUT_NANOS;
use forwarding_middleware::DEFAULT_MEMO_NAMESPACE;

use crate::{LogFormat, NodeError};

/// Configuration for a forwarding host.
///
/// Can be loaded from a TOML file via [`ForwardingConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingConfig {
    /// Chain id that transaction signatures commit to.
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Address allowed to change the denom policy. Empty means the
    /// governance module account.
    #[serde(default)]
    pub authority: String,

    /// Human-readable prefix of encoded addresses.
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,

    /// Top-level memo key under which registration directives are looked up.
    #[serde(default = "default_memo_namespace")]
    pub memo_namespace: String,

    /// Relative timeout of outbound sweep transfers.
    #[serde(default = "default_packet_timeout_nanos")]
    pub packet_timeout_nanos: u64,

    /// Gas available to each transaction's authentication.
    #[serde(default = "default_tx_gas_limit")]
    pub tx_gas_limit: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain_id() -> String {
    "noble-1".to_string()
}

fn default_address_prefix() -> String {
    "noble".to_string()
}

fn default_memo_namespace() -> String {
    DEFAULT_MEMO_NAMESPACE.to_string()
}

fn default_packet_timeout_nanos() -> u64 {
    DEFAULT_PACKET_TIMEOUT_NANOS
}

fn default_tx_gas_limit() -> u64 {
    200_000
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ForwardingConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }

    pub fn validate(&self) -> Result<(), NodeError> {
        if self.chain_id.is_empty() {
            return Err(NodeError::Config("chain_id must not be empty".into()));
        }
        if self.address_prefix.is_empty() {
            return Err(NodeError::Config("address_prefix must not be empty".into()));
        }
        if self.memo_namespace.is_empty() {
            return Err(NodeError::Config("memo_namespace must not be empty".into()));
        }
        if self.packet_timeout_nanos == 0 {
            return Err(NodeError::Config("packet_timeout_nanos must be positive".into()));
        }
        self.log_format()?;
        Ok(())
    }
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            authority: String::new(),
            address_prefix: default_address_prefix(),
            memo_namespace: default_memo_namespace(),
            packet_timeout_nanos: default_packet_timeout_nanos(),
            tx_gas_limit: default_tx_gas_limit(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
