//! Ed25519 message signing and credential verification.

use forwarding_types::{Credential, PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    let sig = signing_key.sign(message);
    Signature(sig.to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

/// Verify raw signature bytes under whatever credential an account holds.
///
/// A signerless credential has no private key behind it and never verifies.
pub fn verify_credential(credential: &Credential, message: &[u8], signature: &[u8]) -> bool {
    match credential {
        Credential::Ed25519(public_key) => {
            let Ok(bytes) = <[u8; 64]>::try_from(signature) else {
                return false;
            };
            verify_signature(message, &Signature(bytes), public_key)
        }
        Credential::Signerless(key) => key.verify_signature(message, signature),
    }
}
