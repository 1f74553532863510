//! Inbound packet payloads and acknowledgements.
//!
//! Two payload shapes travel over forwarding-enabled transfer channels: the
//! standard fungible-token transfer, whose memo may embed a registration
//! directive, and a bare registration request. Every field is optional, as in
//! the proto3 JSON encoding they come from. Both decoders reject unknown fields,
//! which is what tells the two shapes apart.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A packet as delivered by the transport layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub sequence: u64,
    pub source_port: String,
    pub source_channel: String,
    pub destination_port: String,
    pub destination_channel: String,
    pub data: Vec<u8>,
}

/// ICS-20 fungible token transfer payload. `amount` is a decimal string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FungibleTokenPacketData {
    pub denom: String,
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    pub memo: String,
}

impl FungibleTokenPacketData {
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        serde_json::from_slice(data).ok()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// The registration directive embedded under `namespace` in the memo, if any.
    ///
    /// Memos that are not JSON, or that carry no well-formed directive, yield `None`.
    pub fn forwarding_directive(&self, namespace: &str) -> Option<ForwardingDirective> {
        if self.memo.is_empty() {
            return None;
        }
        let memo: Value = serde_json::from_str(&self.memo).ok()?;
        let directive = memo.get(namespace)?.get("forwarding")?;
        serde_json::from_value(directive.clone()).ok()
    }
}

/// Registration request carried in a transfer memo:
/// `{"<namespace>":{"forwarding":{"recipient":…,"channel":…,"fallback":…}}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardingDirective {
    pub recipient: String,
    pub channel: String,
    pub fallback: String,
}

impl ForwardingDirective {
    /// Wrap the directive in a memo under `namespace`.
    pub fn to_memo(&self, namespace: &str) -> String {
        let mut inner = serde_json::Map::new();
        inner.insert("forwarding".to_string(), serde_json::json!(self));
        let mut outer = serde_json::Map::new();
        outer.insert(namespace.to_string(), Value::Object(inner));
        Value::Object(outer).to_string()
    }
}

/// Stand-alone registration payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterAccountData {
    pub recipient: String,
    pub channel: String,
    pub fallback: String,
}

impl RegisterAccountData {
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        serde_json::from_slice(data).ok()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Outcome of receiving a packet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    Result(Vec<u8>),
    Error(String),
}

impl Acknowledgement {
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::Error(err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(memo: &str) -> FungibleTokenPacketData {
        FungibleTokenPacketData {
            denom: "uusdc".into(),
            amount: "100".into(),
            sender: "cosmos1sender".into(),
            receiver: "noble_receiver".into(),
            memo: memo.into(),
        }
    }

    #[test]
    fn payload_shapes_are_disjoint() {
        let reg = RegisterAccountData {
            recipient: "cosmos1r".into(),
            ..Default::default()
        };
        assert!(FungibleTokenPacketData::from_bytes(&reg.to_bytes()).is_none());
        assert!(RegisterAccountData::from_bytes(&transfer("").to_bytes()).is_none());
        assert!(RegisterAccountData::from_bytes(&reg.to_bytes()).is_some());
    }

    #[test]
    fn garbage_parses_as_neither() {
        assert!(FungibleTokenPacketData::from_bytes(b"not json").is_none());
        assert!(RegisterAccountData::from_bytes(b"{\"foo\":1}").is_none());
    }

    #[test]
    fn directive_is_found_under_namespace() {
        let directive = ForwardingDirective {
            recipient: "osmo1r".into(),
            channel: "channel-3".into(),
            fallback: String::new(),
        };
        let data = transfer(&directive.to_memo("noble"));
        assert_eq!(data.forwarding_directive("noble"), Some(directive));
        assert_eq!(data.forwarding_directive("other"), None);
    }

    #[test]
    fn directive_ignores_unrelated_memos() {
        assert_eq!(transfer("").forwarding_directive("noble"), None);
        assert_eq!(transfer("hello").forwarding_directive("noble"), None);
        assert_eq!(
            transfer(r#"{"noble":{"swap":{}}}"#).forwarding_directive("noble"),
            None
        );
        assert_eq!(
            transfer(r#"{"noble":{"forwarding":{"recipient":7}}}"#).forwarding_directive("noble"),
            None
        );
    }

    #[test]
    fn transfer_with_missing_fields_is_still_a_transfer() {
        let data = FungibleTokenPacketData::from_bytes(br#"{"denom":"uusdc","amount":"5"}"#)
            .expect("partial transfer");
        assert_eq!(data.receiver, "");
        assert_eq!(data.memo, "");
        assert!(RegisterAccountData::from_bytes(br#"{"denom":"uusdc"}"#).is_none());
    }

    #[test]
    fn directive_without_recipient_is_still_found() {
        let data = transfer(r#"{"noble":{"forwarding":{"channel":"channel-2"}}}"#);
        assert_eq!(
            data.forwarding_directive("noble"),
            Some(ForwardingDirective {
                recipient: String::new(),
                channel: "channel-2".into(),
                fallback: String::new(),
            })
        );
    }

    #[test]
    fn error_ack_is_not_success() {
        assert!(!Acknowledgement::error("boom").is_success());
        assert!(Acknowledgement::Result(vec![1]).is_success());
    }
}
