//! The keeper: persistent and transient state plus collaborator handles.

use crate::events::{EventBus, ForwardingEvent};
use crate::pending::queue_forward;
use crate::ForwardingError;
use forwarding_crypto::escrow_address;
use forwarding_host::{
    AccountKeeper, BankKeeper, ChannelKeeper, HeaderService, SendRestrictionFn, TransferKeeper,
};
use forwarding_store::{ForwardingStore, PendingForwardStore};
use forwarding_types::{Account, AddressCodec, TRANSFER_PORT, WILDCARD};
use std::sync::Arc;

/// Relative timeout of outbound sweep transfers: ten minutes.
pub const DEFAULT_PACKET_TIMEOUT_NANOS: u64 = 600_000_000_000;

/// Handles to everything the module reaches on the host chain.
#[derive(Clone)]
pub struct HostServices {
    pub accounts: Arc<dyn AccountKeeper>,
    pub bank: Arc<dyn BankKeeper>,
    pub channels: Arc<dyn ChannelKeeper>,
    pub transfer: Arc<dyn TransferKeeper>,
    pub header: Arc<dyn HeaderService>,
    pub codec: Arc<dyn AddressCodec>,
}

pub struct Keeper {
    pub(crate) store: Arc<dyn ForwardingStore>,
    pub(crate) transient: Arc<dyn PendingForwardStore>,
    pub(crate) host: HostServices,
    authority: String,
    packet_timeout_nanos: u64,
    events: EventBus,
}

impl Keeper {
    pub fn new(
        store: Arc<dyn ForwardingStore>,
        transient: Arc<dyn PendingForwardStore>,
        host: HostServices,
        authority: impl Into<String>,
    ) -> Self {
        Self {
            store,
            transient,
            host,
            authority: authority.into(),
            packet_timeout_nanos: DEFAULT_PACKET_TIMEOUT_NANOS,
            events: EventBus::new(),
        }
    }

    pub fn with_packet_timeout(mut self, nanos: u64) -> Self {
        self.packet_timeout_nanos = nanos;
        self
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn packet_timeout_nanos(&self) -> u64 {
        self.packet_timeout_nanos
    }

    pub fn codec(&self) -> &dyn AddressCodec {
        self.host.codec.as_ref()
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ForwardingEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Buffer events until [`Keeper::release_events`] or [`Keeper::discard_events`].
    pub fn hold_events(&self) {
        self.events.hold();
    }

    pub fn release_events(&self) {
        self.events.release();
    }

    pub fn discard_events(&self) {
        self.events.discard();
    }

    pub(crate) fn emit(&self, event: ForwardingEvent) {
        self.events.emit(&event);
    }

    /// Whether `denom` may be swept. The wildcard admits everything.
    pub fn is_allowed_denom(&self, denom: &str) -> Result<bool, ForwardingError> {
        if self.store.has_allowed_denom(WILDCARD)? {
            return Ok(true);
        }
        Ok(self.store.has_allowed_denom(denom)?)
    }

    /// The hook installed on the bank: every send into a forwarding account queues
    /// it, except the escrow release on the account's own channel, which the packet
    /// middleware already handles.
    pub fn send_restriction(&self) -> SendRestrictionFn {
        let accounts = Arc::clone(&self.host.accounts);
        let transient = Arc::clone(&self.transient);
        Box::new(move |from, to, _amount| {
            if let Some(Account::Forwarding(account)) = accounts.get_account(to) {
                if *from != escrow_address(TRANSFER_PORT, &account.channel) {
                    queue_forward(transient.as_ref(), &account);
                }
            }
            Ok(*to)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::TestEnv;
    use forwarding_crypto::escrow_address;
    use forwarding_host::BankKeeper;
    use forwarding_types::{Address, Coins, TRANSFER_PORT};

    #[test]
    fn wildcard_allows_every_denom() {
        let env = TestEnv::new();
        env.keeper.init_genesis(&Default::default()).unwrap();
        assert!(env.keeper.is_allowed_denom("uusdc").unwrap());
        assert!(env.keeper.is_allowed_denom("ibc/ABCDEF").unwrap());
    }

    #[test]
    fn explicit_set_allows_only_members() {
        let env = TestEnv::new();
        env.keeper.set_allowed_denoms(&env.denoms_msg(&["uusdc"])).unwrap();
        assert!(env.keeper.is_allowed_denom("uusdc").unwrap());
        assert!(!env.keeper.is_allowed_denom("ueure").unwrap());
    }

    #[test]
    fn empty_set_allows_nothing() {
        let env = TestEnv::new();
        assert!(!env.keeper.is_allowed_denom("uusdc").unwrap());
    }

    #[test]
    fn deposit_into_forwarding_account_queues_it() {
        let env = TestEnv::new();
        let address = env.register("channel-0", "cosmos1r", "");
        let funder = Address::new([1u8; 20]);
        let coins: Coins = "10uusdc".parse().unwrap();
        env.bank.mint(&funder, &coins);

        env.bank.send_coins(&funder, &address, &coins).unwrap();

        assert_eq!(env.keeper.pending_forwards().unwrap().len(), 1);
    }

    #[test]
    fn escrow_release_does_not_queue() {
        let env = TestEnv::new();
        let address = env.register("channel-0", "cosmos1r", "");
        let escrow = escrow_address(TRANSFER_PORT, "channel-0");
        let coins: Coins = "10uusdc".parse().unwrap();
        env.bank.mint(&escrow, &coins);

        env.bank.send_coins(&escrow, &address, &coins).unwrap();

        assert!(env.keeper.pending_forwards().unwrap().is_empty());
    }

    #[test]
    fn escrow_of_another_channel_still_queues() {
        let env = TestEnv::new();
        let address = env.register("channel-0", "cosmos1r", "");
        let escrow = escrow_address(TRANSFER_PORT, "channel-1");
        let coins: Coins = "10uusdc".parse().unwrap();
        env.bank.mint(&escrow, &coins);

        env.bank.send_coins(&escrow, &address, &coins).unwrap();

        assert_eq!(env.keeper.pending_forwards().unwrap().len(), 1);
    }

    #[test]
    fn deposit_into_plain_account_is_ignored() {
        let env = TestEnv::new();
        let funder = Address::new([1u8; 20]);
        let coins: Coins = "10uusdc".parse().unwrap();
        env.bank.mint(&funder, &coins);

        env.bank
            .send_coins(&funder, &Address::new([2u8; 20]), &coins)
            .unwrap();

        assert!(env.keeper.pending_forwards().unwrap().is_empty());
    }
}
