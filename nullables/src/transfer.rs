//! Nullable ICS-20 transfer: outbound sends are escrowed and recorded, inbound
//! packets credit the receiver.

use forwarding_crypto::{escrow_address, module_address};
use forwarding_host::{BankKeeper, HostError, IbcModule, TransferKeeper};
use forwarding_messages::{Acknowledgement, FungibleTokenPacketData, MsgTransfer, Packet};
use forwarding_types::{Address, AddressCodec, Coin, Coins};
use crate::NullBank;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// A transfer that left the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentTransfer {
    pub sequence: u64,
    pub msg: MsgTransfer,
}

/// Outbound transfer keeper. Escrows the token on the source channel and keeps a
/// per-`(channel, receiver)` tally standing in for the remote chain.
pub struct NullTransfer {
    bank: Arc<dyn BankKeeper>,
    codec: Arc<dyn AddressCodec>,
    sent: Mutex<Vec<SentTransfer>>,
    remote: Mutex<BTreeMap<(String, String), Coins>>,
    fail_denoms: Mutex<HashSet<String>>,
}

impl NullTransfer {
    pub fn new(bank: Arc<dyn BankKeeper>, codec: Arc<dyn AddressCodec>) -> Self {
        Self {
            bank,
            codec,
            sent: Mutex::new(Vec::new()),
            remote: Mutex::new(BTreeMap::new()),
            fail_denoms: Mutex::new(HashSet::new()),
        }
    }

    /// Make every transfer of `denom` fail.
    pub fn fail_denom(&self, denom: &str) {
        self.fail_denoms.lock().unwrap().insert(denom.to_string());
    }

    pub fn sent(&self) -> Vec<SentTransfer> {
        self.sent.lock().unwrap().clone()
    }

    /// What `receiver` has been sent over `channel`, as the counterparty would see it.
    pub fn remote_balance(&self, channel: &str, receiver: &str) -> Coins {
        self.remote
            .lock()
            .unwrap()
            .get(&(channel.to_string(), receiver.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

impl TransferKeeper for NullTransfer {
    fn transfer(&self, msg: &MsgTransfer) -> Result<u64, HostError> {
        if self.fail_denoms.lock().unwrap().contains(&msg.token.denom) {
            return Err(HostError::Transfer(format!(
                "{} transfers are disabled",
                msg.token.denom
            )));
        }

        let sender = self
            .codec
            .decode(&msg.sender)
            .map_err(|e| HostError::Transfer(e.to_string()))?;
        let escrow = escrow_address(&msg.source_port, &msg.source_channel);
        let amount = Coins::from_coins([msg.token.clone()]);
        self.bank.send_coins(&sender, &escrow, &amount)?;

        self.remote
            .lock()
            .unwrap()
            .entry((msg.source_channel.clone(), msg.receiver.clone()))
            .or_default()
            .add(&amount);

        let mut sent = self.sent.lock().unwrap();
        let sequence = sent.len() as u64 + 1;
        sent.push(SentTransfer {
            sequence,
            msg: msg.clone(),
        });
        Ok(sequence)
    }
}

/// The transfer application at the bottom of the receive stack.
///
/// Tokens already escrowed on the destination channel are released from escrow;
/// anything else is minted to the transfer module account and sent on from there.
pub struct NullTransferModule {
    bank: Arc<NullBank>,
    codec: Arc<dyn AddressCodec>,
}

impl NullTransferModule {
    pub fn new(bank: Arc<NullBank>, codec: Arc<dyn AddressCodec>) -> Self {
        Self { bank, codec }
    }

    fn credit(&self, packet: &Packet, data: &FungibleTokenPacketData) -> Result<(), HostError> {
        let receiver = self
            .codec
            .decode(&data.receiver)
            .map_err(|e| HostError::Other(e.to_string()))?;
        let amount: u128 = data
            .amount
            .parse()
            .map_err(|_| HostError::Other(format!("invalid amount {}", data.amount)))?;
        let coins = Coins::from_coins([Coin::new(amount, data.denom.clone())]);

        let escrow = escrow_address(&packet.destination_port, &packet.destination_channel);
        let source = if self.bank.get_all_balances(&escrow).amount_of(&data.denom) >= amount {
            escrow
        } else {
            let module = module_address(&packet.destination_port);
            self.bank.mint(&module, &coins);
            module
        };
        self.bank.send_coins(&source, &receiver, &coins)
    }
}

impl IbcModule for NullTransferModule {
    fn on_recv_packet(&self, packet: &Packet, _relayer: &Address) -> Acknowledgement {
        let Some(data) = FungibleTokenPacketData::from_bytes(&packet.data) else {
            return Acknowledgement::error("cannot unmarshal ICS-20 transfer packet data");
        };
        match self.credit(packet, &data) {
            Ok(()) => Acknowledgement::Result(vec![1]),
            Err(e) => Acknowledgement::error(e),
        }
    }
}
