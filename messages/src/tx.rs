//! Transaction envelope.

use crate::Msg;
use forwarding_types::Credential;
use serde::{Deserialize, Serialize};

/// One signer's contribution: the credential it presents and its signature over
/// the [`SignDoc`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureV2 {
    pub credential: Credential,
    pub signature: Vec<u8>,
    pub sequence: u64,
}

/// A transaction: messages plus one signature per distinct signer, in the order
/// signers first appear in `msgs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub msgs: Vec<Msg>,
    pub signatures: Vec<SignatureV2>,
    #[serde(default)]
    pub memo: String,
}

impl Tx {
    /// Distinct signers in first-appearance order.
    pub fn signers(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for msg in &self.msgs {
            let signer = msg.signer();
            if !out.contains(&signer) {
                out.push(signer);
            }
        }
        out
    }
}

/// The bytes a signer commits to.
#[derive(Clone, Debug, Serialize)]
pub struct SignDoc<'a> {
    pub chain_id: &'a str,
    pub account_number: u64,
    pub sequence: u64,
    pub msgs: &'a [Msg],
    pub memo: &'a str,
}

impl SignDoc<'_> {
    pub fn to_bytes(&self) -> Vec<u8> {
        // Serializing plain structs and enums to JSON cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }
}
