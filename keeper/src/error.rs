use forwarding_store::StoreError;
use forwarding_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForwardingError {
    #[error("invalid channel")]
    InvalidChannel,

    #[error("channel does not exist: {0}")]
    ChannelNotFound(String),

    #[error("channel is not open: {channel}, {state}")]
    ChannelNotOpen { channel: String, state: String },

    #[error("invalid fallback address")]
    InvalidFallback,

    #[error("attempting to register an existing user account with address: {0}")]
    ExistingUserAccount(String),

    #[error("account has already been registered")]
    AlreadyRegistered,

    #[error("invalid account address")]
    InvalidAccountAddress,

    #[error("account does not exist")]
    AccountNotFound,

    #[error("account is not a forwarding account")]
    NotForwardingAccount,

    #[error("account does not require clearing")]
    NothingToClear,

    #[error("failed to decode fallback address: {0}")]
    UndecodableFallback(String),

    #[error("failed to clear balance to fallback account")]
    FallbackTransferFailed,

    #[error("signer is not authority: expected {expected}, got {got}")]
    InvalidAuthority { expected: String, got: String },

    #[error("invalid allowed denoms: {0}")]
    InvalidDenoms(String),

    #[error("invalid genesis state: {0}")]
    InvalidGenesis(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Types(#[from] TypesError),
}
