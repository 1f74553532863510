//! Cryptographic primitives for the forwarding module.
//!
//! - **SHA-256** for address derivation (domain-separated, ADR-028 style)
//! - **Blake2b** for the address-codec checksum
//! - **Ed25519** for ordinary account signatures
//! - Explicit credential verification, under which a signerless key never verifies

pub mod codec;
pub mod derive;
pub mod hash;
pub mod keys;
pub mod sign;

pub use codec::Base32Codec;
pub use derive::{
    address_from_public_key, derive, escrow_address, forwarding_address,
    legacy_forwarding_address, module_address,
};
pub use hash::{blake2b_256, sha256, sha256_multi};
pub use keys::{keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_credential, verify_signature};
