//! End-to-end tests over the assembled host: transactions through the
//! authentication chain, packets through the middleware, and whole cycles
//! (deliver → end_block → commit) over in-memory collaborators.

use forwarding_crypto::{
    address_from_public_key, forwarding_address, keypair_from_seed, sign_message, Base32Codec,
};
use forwarding_host::{AccountKeeper, BankKeeper};
use forwarding_keeper::{ForwardingEvent, GenesisState, HostServices};
use forwarding_messages::{
    FungibleTokenPacketData, ForwardingDirective, Msg, MsgClearAccount, MsgRegisterAccount,
    MsgSend, MsgSetAllowedDenoms, Packet, SignDoc, SignatureV2, Tx,
};
use forwarding_node::{AppServices, ForwardingApp, ForwardingConfig, MsgResponse, NodeError};
use forwarding_nullables::{
    NullAccountKeeper, NullBank, NullChannelKeeper, NullHeader, NullStore, NullTransfer,
    NullTransferModule, NullTransientStore,
};
use forwarding_types::{
    Address, AddressCodec, ChannelState, Coins, Credential, KeyPair, SignerlessKey,
};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const RECIPIENT: &str = "cosmos1recipient";

struct Harness {
    app: ForwardingApp,
    accounts: Arc<NullAccountKeeper>,
    bank: Arc<NullBank>,
    channels: Arc<NullChannelKeeper>,
    transfer: Arc<NullTransfer>,
    header: Arc<NullHeader>,
    codec: Arc<Base32Codec>,
    events: Arc<Mutex<Vec<ForwardingEvent>>>,
    user: KeyPair,
    admin: KeyPair,
}

impl Harness {
    fn new() -> Self {
        Self::with_store(NullStore::new(), true)
    }

    fn with_store(store: NullStore, init_genesis: bool) -> Self {
        let accounts = Arc::new(NullAccountKeeper::new());
        let bank = Arc::new(NullBank::with_accounts(accounts.clone()));
        let channels = Arc::new(NullChannelKeeper::new());
        let header = Arc::new(NullHeader::new(1, 1_700_000_000));
        let codec = Arc::new(Base32Codec::new("noble"));
        let transfer = Arc::new(NullTransfer::new(bank.clone(), codec.clone()));
        channels.open("channel-0", "cosmoshub-4");
        channels.open("channel-1", "osmosis-1");

        let user = keypair_from_seed(&[1u8; 32]);
        let admin = keypair_from_seed(&[2u8; 32]);
        let config = ForwardingConfig {
            authority: codec.encode(&address_from_public_key(&admin.public)),
            ..Default::default()
        };

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let services = AppServices {
            store: Arc::new(store),
            transient: Arc::new(NullTransientStore::new()),
            host: HostServices {
                accounts: accounts.clone(),
                bank: bank.clone(),
                channels: channels.clone(),
                transfer: transfer.clone(),
                header: header.clone(),
                codec: codec.clone(),
            },
            transfer_app: Arc::new(NullTransferModule::new(bank.clone(), codec.clone())),
            listeners: vec![Box::new(move |event: &ForwardingEvent| {
                sink.lock().unwrap().push(event.clone());
            })],
        };
        let app = ForwardingApp::new(config, services).expect("app");
        if init_genesis {
            app.init_genesis(&GenesisState::default()).expect("genesis");
        }

        let harness = Self {
            app,
            accounts,
            bank,
            channels,
            transfer,
            header,
            codec,
            events,
            user,
            admin,
        };
        harness.bank.mint(&harness.user_address(), &coins("100000000uusdc,5000000ueure"));
        harness.bank.mint(&harness.admin_address(), &coins("1uusdc"));
        harness
    }

    fn user_address(&self) -> Address {
        address_from_public_key(&self.user.public)
    }

    fn admin_address(&self) -> Address {
        address_from_public_key(&self.admin.public)
    }

    fn encode(&self, address: &Address) -> String {
        self.codec.encode(address)
    }

    fn sign(&self, key: &KeyPair, msgs: Vec<Msg>) -> Tx {
        let address = address_from_public_key(&key.public);
        let account = self.accounts.get_account(&address).expect("signer account");
        let doc = SignDoc {
            chain_id: &self.app.config().chain_id,
            account_number: account.account_number(),
            sequence: account.sequence(),
            msgs: &msgs,
            memo: "",
        };
        let signature = sign_message(&doc.to_bytes(), &key.private);
        Tx {
            msgs,
            signatures: vec![SignatureV2 {
                credential: Credential::Ed25519(key.public.clone()),
                signature: signature.0.to_vec(),
                sequence: account.sequence(),
            }],
            memo: String::new(),
        }
    }

    fn register(&self, channel: &str, fallback: &str) -> Address {
        let msg = Msg::RegisterAccount(MsgRegisterAccount {
            signer: self.encode(&self.user_address()),
            recipient: RECIPIENT.into(),
            channel: channel.into(),
            fallback: fallback.into(),
        });
        let responses = self.app.deliver_tx(&self.sign(&self.user, vec![msg])).expect("register");
        let MsgResponse::RegisterAccount(res) = &responses[0] else {
            panic!("unexpected response {responses:?}");
        };
        self.codec.decode(&res.address).unwrap()
    }

    fn deposit(&self, to: &Address, amount: &str) {
        let msg = Msg::Send(MsgSend {
            from: self.encode(&self.user_address()),
            to: self.encode(to),
            amount: coins(amount),
        });
        self.app
            .deliver_tx(&self.sign(&self.user, vec![msg]))
            .expect("deposit");
    }

    fn end_cycle(&self) {
        self.app.end_block();
        self.app.commit().expect("commit");
        self.header.advance(6);
    }

    fn remote(&self, channel: &str) -> Coins {
        self.transfer.remote_balance(channel, RECIPIENT)
    }
}

fn coins(s: &str) -> Coins {
    s.parse().expect("valid coins")
}

// ---------------------------------------------------------------------------
// Sweep scenarios
// ---------------------------------------------------------------------------

#[test]
fn deposit_is_swept_at_end_of_cycle() {
    let h = Harness::new();
    let address = h.register("channel-0", "");
    h.deposit(&address, "1000000uusdc");

    h.end_cycle();

    assert_eq!(h.remote("channel-0").amount_of("uusdc"), 1_000_000);
    assert!(h.bank.get_all_balances(&address).is_zero());
    let stats = h.app.keeper().query_stats_by_channel("channel-0").unwrap();
    assert_eq!(stats.num_of_accounts, 1);
    assert_eq!(stats.num_of_forwards, 1);
    assert_eq!(stats.total_forwarded.amount_of("uusdc"), 1_000_000);

    let sent = h.transfer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].msg.sender, h.encode(&address));
    assert_eq!(sent[0].msg.timeout_height, 0);
    assert_eq!(
        sent[0].msg.timeout_timestamp,
        1_700_000_000 * 1_000_000_000 + 600_000_000_000
    );
}

#[test]
fn queue_does_not_outlive_its_cycle() {
    let h = Harness::new();
    let address = h.register("channel-0", "");
    h.deposit(&address, "1000000uusdc");
    h.end_cycle();

    h.bank.mint(&address, &coins("7uusdc"));
    h.end_cycle();

    assert_eq!(h.bank.get_all_balances(&address).amount_of("uusdc"), 7);
    assert_eq!(h.transfer.sent().len(), 1);
}

#[test]
fn closed_channel_holds_funds_until_retriggered() {
    let h = Harness::new();
    let address = h.register("channel-0", "");
    h.deposit(&address, "1000000uusdc");
    h.channels.set_state("channel-0", ChannelState::Closed);

    h.end_cycle();

    assert_eq!(h.bank.get_all_balances(&address).amount_of("uusdc"), 1_000_000);
    let stats = h.app.keeper().query_stats_by_channel("channel-0").unwrap();
    assert_eq!(stats.num_of_forwards, 0);
    assert!(stats.total_forwarded.is_zero());

    h.channels.set_state("channel-0", ChannelState::Open);
    h.end_cycle();
    assert!(h.remote("channel-0").is_zero());

    h.deposit(&address, "5uusdc");
    h.end_cycle();
    assert_eq!(h.remote("channel-0").amount_of("uusdc"), 1_000_005);
}

#[test]
fn disallowed_denom_stays_while_allowed_one_is_swept() {
    let h = Harness::new();
    let set = Msg::SetAllowedDenoms(MsgSetAllowedDenoms {
        signer: h.encode(&h.admin_address()),
        denoms: vec!["uusdc".into()],
    });
    h.app.deliver_tx(&h.sign(&h.admin, vec![set])).unwrap();

    let address = h.register("channel-0", "");
    h.deposit(&address, "300ueure,400uusdc");
    h.end_cycle();

    assert_eq!(h.remote("channel-0"), coins("400uusdc"));
    assert_eq!(h.bank.get_all_balances(&address), coins("300ueure"));

    h.deposit(&address, "1uusdc");
    h.end_cycle();
    assert_eq!(h.bank.get_all_balances(&address), coins("300ueure"));
}

#[test]
fn failed_transfer_is_logged_and_other_assets_proceed() {
    let h = Harness::new();
    h.transfer.fail_denom("ueure");
    let address = h.register("channel-1", "");
    h.deposit(&address, "10ueure,20uusdc");

    h.end_cycle();

    assert_eq!(h.remote("channel-1"), coins("20uusdc"));
    assert_eq!(h.bank.get_all_balances(&address), coins("10ueure"));
    assert_eq!(
        h.app.keeper().query_stats_by_channel("channel-1").unwrap().num_of_forwards,
        1
    );
}

// ---------------------------------------------------------------------------
// Clearing
// ---------------------------------------------------------------------------

#[test]
fn clear_to_fallback_is_immediate() {
    let h = Harness::new();
    let fallback = Address::new([8u8; 20]);
    let address = h.register("channel-0", &h.encode(&fallback));
    h.channels.set_state("channel-0", ChannelState::Closed);
    h.deposit(&address, "250uusdc");

    let clear = Msg::ClearAccount(MsgClearAccount {
        signer: h.encode(&h.user_address()),
        address: h.encode(&address),
        fallback: true,
    });
    h.app.deliver_tx(&h.sign(&h.user, vec![clear])).unwrap();

    assert!(h.bank.get_all_balances(&address).is_zero());
    assert_eq!(h.bank.get_all_balances(&fallback), coins("250uusdc"));
    assert!(h.events.lock().unwrap().iter().any(|e| matches!(
        e,
        ForwardingEvent::AccountCleared { recipient, .. } if *recipient == h.encode(&fallback)
    )));
}

#[test]
fn clear_without_fallback_requeues_for_next_sweep() {
    let h = Harness::new();
    let address = h.register("channel-0", "");
    h.deposit(&address, "90uusdc");
    h.channels.set_state("channel-0", ChannelState::Closed);
    h.end_cycle();
    h.channels.set_state("channel-0", ChannelState::Open);

    let clear = Msg::ClearAccount(MsgClearAccount {
        signer: h.encode(&h.user_address()),
        address: h.encode(&address),
        fallback: false,
    });
    h.app.deliver_tx(&h.sign(&h.user, vec![clear])).unwrap();
    h.end_cycle();

    assert_eq!(h.remote("channel-0"), coins("90uusdc"));
}

// ---------------------------------------------------------------------------
// Signerless registration
// ---------------------------------------------------------------------------

fn signerless_registration(h: &Harness, address: &Address, sequence: u64) -> Tx {
    Tx {
        msgs: vec![Msg::RegisterAccount(MsgRegisterAccount {
            signer: h.encode(address),
            recipient: RECIPIENT.into(),
            channel: "channel-0".into(),
            fallback: String::new(),
        })],
        signatures: vec![SignatureV2 {
            credential: Credential::Signerless(SignerlessKey::new(*address)),
            signature: Vec::new(),
            sequence,
        }],
        memo: String::new(),
    }
}

#[test]
fn funded_address_registers_itself() {
    let h = Harness::new();
    let address = forwarding_address("channel-0", RECIPIENT, "");
    h.deposit(&address, "42uusdc");

    h.app
        .deliver_tx(&signerless_registration(&h, &address, 0))
        .expect("signerless registration");

    let account = h.accounts.get_account(&address).unwrap();
    assert!(account.as_forwarding().is_some());
    assert!(account.credential().unwrap().is_signerless_for(&address));

    h.app
        .deliver_tx(&signerless_registration(&h, &address, 1))
        .expect("repeat is idempotent");
    assert_eq!(h.app.keeper().num_of_accounts("channel-0").unwrap(), 1);

    h.end_cycle();
    assert_eq!(h.remote("channel-0"), coins("42uusdc"));
}

#[test]
fn unfunded_signerless_registration_is_rejected() {
    let h = Harness::new();
    let address = forwarding_address("channel-0", RECIPIENT, "");
    h.accounts.set_account(h.accounts.new_account_with_address(&address));

    let err = h
        .app
        .deliver_tx(&signerless_registration(&h, &address, 0))
        .unwrap_err();
    assert!(matches!(err, NodeError::Ante(_)));
    assert!(h.accounts.get_account(&address).unwrap().as_forwarding().is_none());
}

#[test]
fn unsigned_tx_is_rejected() {
    let h = Harness::new();
    let mut tx = h.sign(&h.user, vec![]);
    tx.msgs.push(Msg::RegisterAccount(MsgRegisterAccount {
        signer: h.encode(&h.user_address()),
        recipient: RECIPIENT.into(),
        channel: "channel-0".into(),
        fallback: String::new(),
    }));
    tx.signatures.clear();
    assert!(matches!(h.app.deliver_tx(&tx), Err(NodeError::Ante(_))));
}

#[test]
fn only_authority_sets_denoms() {
    let h = Harness::new();
    let set = Msg::SetAllowedDenoms(MsgSetAllowedDenoms {
        signer: h.encode(&h.user_address()),
        denoms: vec!["uusdc".into()],
    });
    let err = h.app.deliver_tx(&h.sign(&h.user, vec![set])).unwrap_err();
    assert!(err.to_string().contains("signer is not authority"));
    assert_eq!(h.app.keeper().query_denoms().unwrap().allowed_denoms, vec!["*"]);
}

// ---------------------------------------------------------------------------
// Atomicity
// ---------------------------------------------------------------------------

#[test]
fn rejected_tx_does_not_plant_a_credential() {
    let h = Harness::new();
    let victim = keypair_from_seed(&[3u8; 32]);
    let victim_address = address_from_public_key(&victim.public);
    h.deposit(&victim_address, "1000uusdc");

    let forged = Tx {
        msgs: vec![Msg::Send(MsgSend {
            from: h.encode(&victim_address),
            to: h.encode(&h.user_address()),
            amount: coins("1000uusdc"),
        })],
        signatures: vec![SignatureV2 {
            credential: Credential::Signerless(SignerlessKey::new(victim_address)),
            signature: Vec::new(),
            sequence: 0,
        }],
        memo: String::new(),
    };
    assert!(matches!(h.app.deliver_tx(&forged), Err(NodeError::Ante(_))));

    let account = h.accounts.get_account(&victim_address).unwrap();
    assert_eq!(account.credential(), None);
    assert_eq!(account.sequence(), 0);
    assert_eq!(h.bank.get_all_balances(&victim_address), coins("1000uusdc"));

    let own = Msg::Send(MsgSend {
        from: h.encode(&victim_address),
        to: h.encode(&h.user_address()),
        amount: coins("400uusdc"),
    });
    h.app
        .deliver_tx(&h.sign(&victim, vec![own]))
        .expect("victim can still sign");
    assert_eq!(h.bank.get_all_balances(&victim_address), coins("600uusdc"));
}

#[test]
fn simulation_leaves_accounts_untouched() {
    let h = Harness::new();
    let msg = Msg::Send(MsgSend {
        from: h.encode(&h.user_address()),
        to: h.encode(&h.admin_address()),
        amount: coins("5uusdc"),
    });
    let tx = h.sign(&h.user, vec![msg]);

    assert_eq!(h.app.simulate_tx(&tx).unwrap(), 590);
    let account = h.accounts.get_account(&h.user_address()).unwrap();
    assert_eq!(account.sequence(), 0);
    assert_eq!(account.credential(), None);

    h.app.deliver_tx(&tx).expect("simulated tx still delivers");
    assert_eq!(h.accounts.get_account(&h.user_address()).unwrap().sequence(), 1);
}

#[test]
fn simulation_cannot_plant_a_signerless_credential() {
    let h = Harness::new();
    let victim = address_from_public_key(&keypair_from_seed(&[3u8; 32]).public);
    h.deposit(&victim, "10uusdc");

    let tx = Tx {
        msgs: vec![Msg::Send(MsgSend {
            from: h.encode(&victim),
            to: h.encode(&h.user_address()),
            amount: coins("10uusdc"),
        })],
        signatures: vec![SignatureV2 {
            credential: Credential::Signerless(SignerlessKey::new(victim)),
            signature: Vec::new(),
            sequence: 0,
        }],
        memo: String::new(),
    };
    h.app.simulate_tx(&tx).unwrap();
    assert_eq!(h.accounts.get_account(&victim).unwrap().credential(), None);
}

#[test]
fn failed_message_undoes_the_earlier_ones() {
    let h = Harness::new();
    let target = forwarding_address("channel-0", RECIPIENT, "");
    let before = h.bank.get_all_balances(&h.user_address());
    let msgs = vec![
        Msg::Send(MsgSend {
            from: h.encode(&h.user_address()),
            to: h.encode(&target),
            amount: coins("1000uusdc"),
        }),
        Msg::RegisterAccount(MsgRegisterAccount {
            signer: h.encode(&h.user_address()),
            recipient: RECIPIENT.into(),
            channel: "channel-0".into(),
            fallback: String::new(),
        }),
        Msg::RegisterAccount(MsgRegisterAccount {
            signer: h.encode(&h.user_address()),
            recipient: RECIPIENT.into(),
            channel: "channel-7".into(),
            fallback: String::new(),
        }),
    ];

    let err = h.app.deliver_tx(&h.sign(&h.user, msgs)).unwrap_err();
    assert!(matches!(err, NodeError::Forwarding(_)));

    assert_eq!(h.bank.get_all_balances(&h.user_address()), before);
    assert!(h.bank.get_all_balances(&target).is_zero());
    assert!(h.accounts.get_account(&target).is_none());
    assert_eq!(h.app.keeper().num_of_accounts("channel-0").unwrap(), 0);
    assert!(h.app.keeper().pending_forwards().unwrap().is_empty());
    assert!(h.events.lock().unwrap().is_empty());
    // Authentication already passed, so the sequence is spent.
    assert_eq!(h.accounts.get_account(&h.user_address()).unwrap().sequence(), 1);
}

#[test]
fn error_ack_undoes_memo_registration() {
    let h = Harness::new();
    let address = forwarding_address("channel-0", RECIPIENT, "");
    let memo = ForwardingDirective {
        recipient: RECIPIENT.into(),
        ..Default::default()
    }
    .to_memo("noble");

    let ack = h
        .app
        .recv_packet(&inbound_transfer(&h.encode(&address), "ten", memo), &Address::ZERO);
    assert!(!ack.is_success());

    assert!(h.accounts.get_account(&address).is_none());
    assert_eq!(h.app.keeper().num_of_accounts("channel-0").unwrap(), 0);
    assert!(h.app.keeper().pending_forwards().unwrap().is_empty());
    assert!(h.events.lock().unwrap().is_empty());
}

#[test]
fn genesis_with_mixed_wildcard_is_rejected() {
    let h = Harness::with_store(NullStore::new(), false);
    let genesis = GenesisState {
        allowed_denoms: vec!["*".into(), "uusdc".into()],
        ..Default::default()
    };
    assert!(matches!(h.app.init_genesis(&genesis), Err(NodeError::Forwarding(_))));
    assert!(h.app.keeper().query_denoms().unwrap().allowed_denoms.is_empty());
}

// ---------------------------------------------------------------------------
// Packets
// ---------------------------------------------------------------------------

fn inbound_transfer(receiver: &str, amount: &str, memo: String) -> Packet {
    let data = FungibleTokenPacketData {
        denom: "uusdc".into(),
        amount: amount.into(),
        sender: "cosmos1sender".into(),
        receiver: receiver.into(),
        memo,
    };
    Packet {
        sequence: 9,
        source_port: "transfer".into(),
        source_channel: "channel-141".into(),
        destination_port: "transfer".into(),
        destination_channel: "channel-0".into(),
        data: data.to_bytes(),
    }
}

#[test]
fn memo_registration_then_sweep() {
    let h = Harness::new();
    let address = forwarding_address("channel-0", RECIPIENT, "");
    let memo = ForwardingDirective {
        recipient: RECIPIENT.into(),
        ..Default::default()
    }
    .to_memo("noble");

    let ack = h
        .app
        .recv_packet(&inbound_transfer(&h.encode(&address), "1000", memo), &Address::ZERO);
    assert!(ack.is_success());

    h.end_cycle();
    assert_eq!(h.remote("channel-0"), coins("1000uusdc"));
    let stats = h.app.keeper().query_stats().unwrap();
    assert_eq!(stats.stats["channel-0"].chain_id, "cosmoshub-4");
    assert_eq!(stats.stats["channel-0"].num_of_forwards, 1);
}

#[test]
fn escrow_release_on_own_channel_is_still_swept() {
    let h = Harness::new();
    let address = h.register("channel-0", "");
    let escrow = forwarding_crypto::escrow_address("transfer", "channel-0");
    h.bank.mint(&escrow, &coins("500uusdc"));

    let ack = h
        .app
        .recv_packet(&inbound_transfer(&h.encode(&address), "500", String::new()), &Address::ZERO);
    assert!(ack.is_success());
    assert!(h.bank.get_all_balances(&escrow).is_zero());

    h.end_cycle();
    assert_eq!(h.remote("channel-0"), coins("500uusdc"));
}

// ---------------------------------------------------------------------------
// Genesis and upgrades
// ---------------------------------------------------------------------------

#[test]
fn genesis_export_reflects_activity() {
    let h = Harness::new();
    let address = h.register("channel-1", "");
    h.deposit(&address, "77uusdc");
    h.end_cycle();

    let exported = h.app.export_genesis().unwrap();
    assert_eq!(exported.allowed_denoms, vec!["*"]);
    assert_eq!(exported.num_of_accounts["channel-1"], 1);
    assert_eq!(exported.num_of_forwards["channel-1"], 1);
    assert_eq!(exported.total_forwarded["channel-1"], "77uusdc");
}

#[test]
fn legacy_store_is_migrated() {
    let store = NullStore::with_legacy_counters(&[("channel-0", "3")], &[("channel-0", "9")]);
    let h = Harness::with_store(store, false);

    assert_eq!(h.app.run_migrations().unwrap(), 2);
    assert_eq!(h.app.keeper().query_denoms().unwrap().allowed_denoms, vec!["*"]);
    let stats = h.app.keeper().query_stats_by_channel("channel-0").unwrap();
    assert_eq!(stats.num_of_accounts, 3);
    assert_eq!(stats.num_of_forwards, 9);
}
