//! Validation errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidAddressLength(usize),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("wildcard can only be present by itself")]
    WildcardNotAlone,

    #[error("cannot allow empty denom")]
    EmptyDenom,

    #[error("account {0} is already a forwarding account")]
    AlreadyForwarding(String),
}
