use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("send restricted: {0}")]
    SendRestricted(String),

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error("{0}")]
    Other(String),
}
