use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("forwarding error: {0}")]
    Forwarding(#[from] forwarding_keeper::ForwardingError),

    #[error("ante error: {0}")]
    Ante(#[from] forwarding_ante::AnteError),

    #[error("host error: {0}")]
    Host(#[from] forwarding_host::HostError),

    #[error("store error: {0}")]
    Store(#[from] forwarding_store::StoreError),

    #[error(transparent)]
    Types(#[from] forwarding_types::TypesError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
