use crate::{ForwardingEvent, HostServices, Keeper};
use forwarding_crypto::{module_address, Base32Codec};
use forwarding_messages::{MsgRegisterAccount, MsgSetAllowedDenoms};
use forwarding_nullables::{
    NullAccountKeeper, NullBank, NullChannelKeeper, NullHeader, NullStore, NullTransfer,
    NullTransientStore,
};
use forwarding_host::BankKeeper;
use forwarding_types::{Address, AddressCodec};
use std::sync::{Arc, Mutex};

pub(crate) struct TestEnv {
    pub keeper: Keeper,
    pub store: Arc<NullStore>,
    pub transient: Arc<NullTransientStore>,
    pub accounts: Arc<NullAccountKeeper>,
    pub bank: Arc<NullBank>,
    pub channels: Arc<NullChannelKeeper>,
    pub transfer: Arc<NullTransfer>,
    pub header: Arc<NullHeader>,
    pub codec: Arc<Base32Codec>,
    pub events: Arc<Mutex<Vec<ForwardingEvent>>>,
}

impl TestEnv {
    /// A keeper over nullables with `channel-0` and `channel-1` open and no
    /// allowed denoms configured.
    pub fn new() -> Self {
        Self::with_store(NullStore::new())
    }

    pub fn with_store(store: NullStore) -> Self {
        let store = Arc::new(store);
        let transient = Arc::new(NullTransientStore::new());
        let accounts = Arc::new(NullAccountKeeper::new());
        let bank = Arc::new(NullBank::with_accounts(accounts.clone()));
        let channels = Arc::new(NullChannelKeeper::new());
        let header = Arc::new(NullHeader::new(100, 1_700_000_000));
        let codec = Arc::new(Base32Codec::new("noble"));
        let transfer = Arc::new(NullTransfer::new(bank.clone(), codec.clone()));

        channels.open("channel-0", "cosmoshub-4");
        channels.open("channel-1", "osmosis-1");

        let host = HostServices {
            accounts: accounts.clone(),
            bank: bank.clone(),
            channels: channels.clone(),
            transfer: transfer.clone(),
            header: header.clone(),
            codec: codec.clone(),
        };
        let authority = codec.encode(&module_address("gov"));
        let mut keeper = Keeper::new(store.clone(), transient.clone(), host, authority);

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        keeper.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));
        bank.append_send_restriction(keeper.send_restriction());

        Self {
            keeper,
            store,
            transient,
            accounts,
            bank,
            channels,
            transfer,
            header,
            codec,
            events,
        }
    }

    pub fn encode(&self, address: &Address) -> String {
        self.codec.encode(address)
    }

    pub fn codec_decode(&self, text: &str) -> Address {
        self.codec.decode(text).unwrap()
    }

    pub fn register_msg(&self, channel: &str, recipient: &str, fallback: &str) -> MsgRegisterAccount {
        MsgRegisterAccount {
            signer: self.encode(&Address::new([0xAA; 20])),
            recipient: recipient.into(),
            channel: channel.into(),
            fallback: fallback.into(),
        }
    }

    pub fn register(&self, channel: &str, recipient: &str, fallback: &str) -> Address {
        let res = self
            .keeper
            .register_account(&self.register_msg(channel, recipient, fallback))
            .unwrap();
        self.codec.decode(&res.address).unwrap()
    }

    pub fn denoms_msg(&self, denoms: &[&str]) -> MsgSetAllowedDenoms {
        MsgSetAllowedDenoms {
            signer: self.keeper.authority().to_string(),
            denoms: denoms.iter().map(|d| d.to_string()).collect(),
        }
    }
}
