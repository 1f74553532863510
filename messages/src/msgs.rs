//! Message-style operations.

use forwarding_types::Coins;
use serde::{Deserialize, Serialize};

/// Register a forwarding account for `(channel, recipient, fallback)`.
///
/// `signer` is not checked by the handler. For a signerless registration it is the
/// derived address itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterAccount {
    pub signer: String,
    pub recipient: String,
    pub channel: String,
    #[serde(default)]
    pub fallback: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterAccountResponse {
    pub address: String,
}

/// Sweep a forwarding account now, or hand its balance to the fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgClearAccount {
    pub signer: String,
    pub address: String,
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgClearAccountResponse {}

/// Replace the allowed-denom set. Authority only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetAllowedDenoms {
    pub signer: String,
    pub denoms: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetAllowedDenomsResponse {}

/// A plain bank send. Carried so deposits can ride in the same transactions as
/// forwarding messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from: String,
    pub to: String,
    pub amount: Coins,
}

/// Every message a transaction can carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "snake_case")]
pub enum Msg {
    RegisterAccount(MsgRegisterAccount),
    ClearAccount(MsgClearAccount),
    SetAllowedDenoms(MsgSetAllowedDenoms),
    Send(MsgSend),
}

impl Msg {
    /// The address string that must authorize this message.
    pub fn signer(&self) -> &str {
        match self {
            Self::RegisterAccount(msg) => &msg.signer,
            Self::ClearAccount(msg) => &msg.signer,
            Self::SetAllowedDenoms(msg) => &msg.signer,
            Self::Send(msg) => &msg.from,
        }
    }

    pub fn as_register_account(&self) -> Option<&MsgRegisterAccount> {
        match self {
            Self::RegisterAccount(msg) => Some(msg),
            _ => None,
        }
    }
}
