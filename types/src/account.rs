//! Account records and the credentials that can sit in them.
//!
//! A plain account can be upgraded in place into a forwarding account: the upgrade keeps
//! the address, account number, credential and sequence, and attaches the forwarding
//! fields. There is no way back.

use crate::{Address, PublicKey, TypesError};
use serde::{Deserialize, Serialize};

/// Pseudo-credential for accounts registered without a signature.
///
/// Carries nothing but the forwarding address it is bound to. It exists so that an account
/// created by a signerless registration still has a credential of a known kind; it never
/// verifies a signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignerlessKey {
    pub address: Address,
}

impl SignerlessKey {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Always false. There is no private key behind a forwarding address.
    pub fn verify_signature(&self, _message: &[u8], _signature: &[u8]) -> bool {
        false
    }
}

/// The kinds of credential an account can hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Credential {
    Ed25519(PublicKey),
    Signerless(SignerlessKey),
}

impl Credential {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ed25519(_) => "ed25519",
            Self::Signerless(_) => "forwarding",
        }
    }

    /// True if this is a signerless marker bound to exactly `address`.
    pub fn is_signerless_for(&self, address: &Address) -> bool {
        matches!(self, Self::Signerless(key) if key.address == *address)
    }
}

/// The record every account starts as.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: Address,
    pub credential: Option<Credential>,
    pub account_number: u64,
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(address: Address, account_number: u64) -> Self {
        Self {
            address,
            credential: None,
            account_number,
            sequence: 0,
        }
    }
}

/// An account whose balance is swept to `recipient` over `channel`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingAccount {
    pub base: BaseAccount,
    pub channel: String,
    /// Opaque to this module; interpreted by the destination chain.
    pub recipient: String,
    /// Local address that can receive the balance through an explicit clear.
    pub fallback: Option<String>,
    /// Block height at which the account was registered.
    pub created_at: u64,
}

impl ForwardingAccount {
    pub fn address(&self) -> &Address {
        &self.base.address
    }

    /// Fallback as it enters address derivation: the empty string when absent.
    pub fn fallback_str(&self) -> &str {
        self.fallback.as_deref().unwrap_or("")
    }
}

/// Every account variant the forwarding module distinguishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    Base(BaseAccount),
    Forwarding(ForwardingAccount),
}

impl Account {
    fn base(&self) -> &BaseAccount {
        match self {
            Self::Base(base) => base,
            Self::Forwarding(fwd) => &fwd.base,
        }
    }

    fn base_mut(&mut self) -> &mut BaseAccount {
        match self {
            Self::Base(base) => base,
            Self::Forwarding(fwd) => &mut fwd.base,
        }
    }

    pub fn address(&self) -> &Address {
        &self.base().address
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.base().credential.as_ref()
    }

    pub fn sequence(&self) -> u64 {
        self.base().sequence
    }

    pub fn account_number(&self) -> u64 {
        self.base().account_number
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.base_mut().credential = Some(credential);
    }

    pub fn increment_sequence(&mut self) {
        let base = self.base_mut();
        base.sequence = base.sequence.saturating_add(1);
    }

    pub fn as_forwarding(&self) -> Option<&ForwardingAccount> {
        match self {
            Self::Forwarding(fwd) => Some(fwd),
            Self::Base(_) => None,
        }
    }

    /// Upgrade a plain account into a forwarding account, keeping its identity.
    ///
    /// Fails if the account is already a forwarding account.
    pub fn into_forwarding(
        self,
        channel: impl Into<String>,
        recipient: impl Into<String>,
        fallback: Option<String>,
        created_at: u64,
    ) -> Result<ForwardingAccount, TypesError> {
        match self {
            Self::Base(base) => Ok(ForwardingAccount {
                base,
                channel: channel.into(),
                recipient: recipient.into(),
                fallback: fallback.filter(|f| !f.is_empty()),
                created_at,
            }),
            Self::Forwarding(fwd) => Err(TypesError::AlreadyForwarding(fwd.base.address.to_hex())),
        }
    }
}

impl From<ForwardingAccount> for Account {
    fn from(account: ForwardingAccount) -> Self {
        Self::Forwarding(account)
    }
}
