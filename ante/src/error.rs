use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnteError {
    #[error("no signatures supplied")]
    NoSignatures,

    #[error("invalid number of signer; expected: {expected}, got {got}")]
    SignerCountMismatch { expected: usize, got: usize },

    #[error("invalid signer address: {0}")]
    InvalidSigner(String),

    #[error("account {0} does not exist")]
    UnknownAccount(String),

    #[error("pubKey does not match signer address {0}")]
    CredentialMismatch(String),

    #[error("pubkey on account is not set: {0}")]
    NoCredential(String),

    #[error("account sequence mismatch, expected {expected}, got {got}")]
    WrongSequence { expected: u64, got: u64 },

    #[error("signature verification failed; please verify account number ({account_number}), sequence ({sequence}) and chain-id ({chain_id})")]
    Unauthorized {
        account_number: u64,
        sequence: u64,
        chain_id: String,
    },

    #[error("unrecognized public key type: {0}")]
    UnrecognizedCredential(String),

    #[error("out of gas in location: {descriptor}; gasWanted: {limit}, gasUsed: {used}")]
    OutOfGas {
        descriptor: String,
        limit: u64,
        used: u64,
    },
}
