//! Inbound packet middleware for forwarding-enabled transfer channels.
//!
//! Two payloads travel over these channels. A fungible-token transfer may carry a
//! registration directive in its memo; its receiver, if it is a forwarding
//! account, gets marked for the end-of-cycle sweep. A bare registration payload
//! registers an account and acknowledges with the derived address.

use forwarding_crypto::module_address;
use forwarding_host::{AccountKeeper, IbcModule};
use forwarding_keeper::{ForwardingError, Keeper};
use forwarding_messages::{
    Acknowledgement, FungibleTokenPacketData, MsgRegisterAccount, MsgRegisterAccountResponse,
    Packet, RegisterAccountData,
};
use forwarding_types::{Account, Address, MODULE_NAME};
use std::sync::Arc;
use tracing::{debug, warn};

/// Memo namespace used when none is configured.
pub const DEFAULT_MEMO_NAMESPACE: &str = "noble";

pub struct Middleware {
    app: Arc<dyn IbcModule>,
    accounts: Arc<dyn AccountKeeper>,
    keeper: Arc<Keeper>,
    namespace: String,
}

impl Middleware {
    pub fn new(
        app: Arc<dyn IbcModule>,
        accounts: Arc<dyn AccountKeeper>,
        keeper: Arc<Keeper>,
    ) -> Self {
        Self {
            app,
            accounts,
            keeper,
            namespace: DEFAULT_MEMO_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn register(
        &self,
        signer: String,
        packet: &Packet,
        recipient: &str,
        channel: &str,
        fallback: &str,
    ) -> Result<MsgRegisterAccountResponse, ForwardingError> {
        let channel = if channel.is_empty() {
            packet.destination_channel.as_str()
        } else {
            channel
        };
        self.keeper.register_account(&MsgRegisterAccount {
            signer,
            recipient: recipient.to_string(),
            channel: channel.to_string(),
            fallback: fallback.to_string(),
        })
    }

    fn on_recv_transfer(
        &self,
        packet: &Packet,
        data: &FungibleTokenPacketData,
        relayer: &Address,
    ) -> Acknowledgement {
        if let Some(directive) = data.forwarding_directive(&self.namespace) {
            let signer = self.keeper.codec().encode(&module_address(MODULE_NAME));
            if let Err(e) = self.register(
                signer,
                packet,
                &directive.recipient,
                &directive.channel,
                &directive.fallback,
            ) {
                warn!(sequence = packet.sequence, error = %e, "memo registration failed");
                return Acknowledgement::error(e);
            }
        }

        if let Ok(receiver) = self.keeper.codec().decode(&data.receiver) {
            if let Some(Account::Forwarding(account)) = self.accounts.get_account(&receiver) {
                debug!(receiver = %data.receiver, "marking forwarding account for sweep");
                self.keeper.set_pending_forward(&account);
            }
        }

        self.app.on_recv_packet(packet, relayer)
    }
}

impl IbcModule for Middleware {
    fn on_recv_packet(&self, packet: &Packet, relayer: &Address) -> Acknowledgement {
        if let Some(data) = FungibleTokenPacketData::from_bytes(&packet.data) {
            return self.on_recv_transfer(packet, &data, relayer);
        }

        let Some(data) = RegisterAccountData::from_bytes(&packet.data) else {
            return self.app.on_recv_packet(packet, relayer);
        };

        match self.register(
            String::new(),
            packet,
            &data.recipient,
            &data.channel,
            &data.fallback,
        ) {
            Ok(res) => Acknowledgement::Result(res.address.into_bytes()),
            Err(e) => {
                warn!(sequence = packet.sequence, error = %e, "packet registration failed");
                Acknowledgement::error(e)
            }
        }
    }
}
