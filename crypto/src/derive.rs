//! Address derivation.
//!
//! `derive(domain, key) = SHA-256(SHA-256(domain) ‖ key)`. Forwarding addresses are the
//! last 20 bytes of `derive("forwarding", channel ‖ recipient ‖ fallback)`. Because the
//! fallback is simply appended, an empty fallback reproduces the two-argument derivation
//! used before fallbacks existed.

use crate::hash::{sha256, sha256_multi};
use forwarding_types::{Address, PublicKey, ADDRESS_LEN, MODULE_NAME};

const ESCROW_VERSION: &str = "ics20-1";

/// Domain-separated derivation of a 32-byte key.
pub fn derive(domain: &[u8], key: &[u8]) -> [u8; 32] {
    let domain_hash = sha256(domain);
    sha256_multi(&[&domain_hash, key])
}

fn truncate_tail(digest: &[u8; 32]) -> Address {
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
    Address::new(out)
}

fn truncate_head(digest: &[u8; 32]) -> Address {
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&digest[..ADDRESS_LEN]);
    Address::new(out)
}

/// Derive the forwarding address for a `(channel, recipient, fallback)` triple.
///
/// Pass `""` for an absent fallback.
pub fn forwarding_address(channel: &str, recipient: &str, fallback: &str) -> Address {
    let digest = sha256_multi(&[
        &sha256(MODULE_NAME.as_bytes()),
        channel.as_bytes(),
        recipient.as_bytes(),
        fallback.as_bytes(),
    ]);
    truncate_tail(&digest)
}

/// The pre-fallback derivation. Kept so stored addresses can be checked against it.
pub fn legacy_forwarding_address(channel: &str, recipient: &str) -> Address {
    let key = format!("{channel}{recipient}");
    truncate_tail(&derive(MODULE_NAME.as_bytes(), key.as_bytes()))
}

/// Address of a module account, e.g. the signer of middleware-driven registrations.
pub fn module_address(name: &str) -> Address {
    truncate_head(&sha256(name.as_bytes()))
}

/// Address holding escrowed native tokens for a transfer channel.
pub fn escrow_address(port: &str, channel: &str) -> Address {
    let contents = format!("{port}/{channel}");
    truncate_head(&sha256_multi(&[
        ESCROW_VERSION.as_bytes(),
        &[0u8],
        contents.as_bytes(),
    ]))
}

/// Address of an ordinary Ed25519 account.
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    truncate_head(&sha256(public_key.as_bytes()))
}
