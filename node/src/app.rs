//! The assembled forwarding host and its per-cycle entry points.

use crate::{ForwardingConfig, NodeError};
use forwarding_ante::{new_ante_handler, AnteChain, AnteContext, AuthParams};
use forwarding_crypto::module_address;
use forwarding_host::IbcModule;
use forwarding_keeper::{
    ForwardingEvent, GenesisState, HostServices, Keeper, Migrator,
};
use forwarding_messages::{
    Acknowledgement, Msg, MsgClearAccountResponse, MsgRegisterAccountResponse, MsgSend,
    MsgSetAllowedDenomsResponse, Packet, Tx,
};
use forwarding_middleware::Middleware;
use forwarding_store::{ForwardingStore, PendingForwardStore, Revertible, Snapshot};
use forwarding_types::Address;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

pub type EventListener = Box<dyn Fn(&ForwardingEvent) + Send + Sync>;

/// Everything the host provides to the module.
pub struct AppServices {
    pub store: Arc<dyn ForwardingStore>,
    /// Per-cycle store holding the pending-forward queue.
    pub transient: Arc<dyn PendingForwardStore>,
    pub host: HostServices,
    /// The transfer application the middleware wraps.
    pub transfer_app: Arc<dyn IbcModule>,
    pub listeners: Vec<EventListener>,
}

/// Result of one message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "snake_case")]
pub enum MsgResponse {
    RegisterAccount(MsgRegisterAccountResponse),
    ClearAccount(MsgClearAccountResponse),
    SetAllowedDenoms(MsgSetAllowedDenomsResponse),
    Send,
}

/// State of every store a transaction can write, captured before it runs.
struct Checkpoint {
    store: Snapshot,
    transient: Snapshot,
    accounts: Snapshot,
    bank: Snapshot,
}

pub struct ForwardingApp {
    config: ForwardingConfig,
    host: HostServices,
    store: Arc<dyn ForwardingStore>,
    transient: Arc<dyn PendingForwardStore>,
    keeper: Arc<Keeper>,
    ante: AnteChain,
    middleware: Middleware,
}

impl ForwardingApp {
    pub fn new(config: ForwardingConfig, services: AppServices) -> Result<Self, NodeError> {
        config.validate()?;
        let AppServices {
            store,
            transient,
            host,
            transfer_app,
            listeners,
        } = services;

        let authority = if config.authority.is_empty() {
            host.codec.encode(&module_address("gov"))
        } else {
            host.codec.decode(&config.authority)?;
            config.authority.clone()
        };

        let mut keeper = Keeper::new(store.clone(), transient.clone(), host.clone(), authority)
            .with_packet_timeout(config.packet_timeout_nanos);
        keeper.subscribe(Box::new(|event| {
            let payload = serde_json::to_string(event).unwrap_or_default();
            info!(event = %payload, "forwarding event");
        }));
        for listener in listeners {
            keeper.subscribe(listener);
        }
        host.bank.append_send_restriction(keeper.send_restriction());
        let keeper = Arc::new(keeper);

        let ante = new_ante_handler(
            host.accounts.clone(),
            host.bank.clone(),
            host.codec.clone(),
            AuthParams::default(),
        );
        let middleware = Middleware::new(transfer_app, host.accounts.clone(), keeper.clone())
            .with_namespace(config.memo_namespace.clone());

        Ok(Self {
            config,
            host,
            store,
            transient,
            keeper,
            ante,
            middleware,
        })
    }

    pub fn keeper(&self) -> &Keeper {
        &self.keeper
    }

    pub fn config(&self) -> &ForwardingConfig {
        &self.config
    }

    pub fn init_genesis(&self, genesis: &GenesisState) -> Result<(), NodeError> {
        self.keeper.init_genesis(genesis)?;
        Ok(())
    }

    pub fn export_genesis(&self) -> Result<GenesisState, NodeError> {
        Ok(self.keeper.export_genesis()?)
    }

    /// Upgrade an existing store to the current schema.
    pub fn run_migrations(&self) -> Result<u32, NodeError> {
        Ok(Migrator::new(&self.keeper).run()?)
    }

    /// Authenticate `tx`, then run its messages in order.
    ///
    /// Both phases are atomic. A rejected tx changes nothing. Once authentication
    /// passes its effects (credentials, sequences) are kept, and the messages
    /// either all apply or, on the first failure, none do.
    pub fn deliver_tx(&self, tx: &Tx) -> Result<Vec<MsgResponse>, NodeError> {
        let mut ctx = AnteContext::new(self.config.chain_id.clone(), self.config.tx_gas_limit);
        self.atomically(|| Ok(self.ante.run(&mut ctx, tx, false)?))?;
        debug!(msgs = tx.msgs.len(), gas_used = ctx.gas_meter.consumed(), "tx authenticated");

        self.atomically(|| tx.msgs.iter().map(|msg| self.dispatch(msg)).collect())
    }

    /// Run the authentication chain without signature checks and report the gas
    /// it used. Nothing it writes is kept.
    pub fn simulate_tx(&self, tx: &Tx) -> Result<u64, NodeError> {
        let mut ctx = AnteContext::new(self.config.chain_id.clone(), self.config.tx_gas_limit);
        let checkpoint = self.checkpoint()?;
        let result = self.ante.run(&mut ctx, tx, true);
        self.rollback(checkpoint)?;
        result?;
        Ok(ctx.gas_meter.consumed())
    }

    fn checkpoint(&self) -> Result<Checkpoint, NodeError> {
        Ok(Checkpoint {
            store: self.store.snapshot()?,
            transient: self.transient.snapshot()?,
            accounts: self.host.accounts.snapshot()?,
            bank: self.host.bank.snapshot()?,
        })
    }

    fn rollback(&self, checkpoint: Checkpoint) -> Result<(), NodeError> {
        self.store.restore(checkpoint.store)?;
        self.transient.restore(checkpoint.transient)?;
        self.host.accounts.restore(checkpoint.accounts)?;
        self.host.bank.restore(checkpoint.bank)?;
        Ok(())
    }

    /// Run `step`. If it fails, every store is put back and its events are dropped.
    fn atomically<T>(
        &self,
        step: impl FnOnce() -> Result<T, NodeError>,
    ) -> Result<T, NodeError> {
        let checkpoint = self.checkpoint()?;
        self.keeper.hold_events();
        match step() {
            Ok(value) => {
                self.keeper.release_events();
                Ok(value)
            }
            Err(err) => {
                self.keeper.discard_events();
                self.rollback(checkpoint)?;
                Err(err)
            }
        }
    }

    fn dispatch(&self, msg: &Msg) -> Result<MsgResponse, NodeError> {
        match msg {
            Msg::RegisterAccount(msg) => {
                Ok(MsgResponse::RegisterAccount(self.keeper.register_account(msg)?))
            }
            Msg::ClearAccount(msg) => Ok(MsgResponse::ClearAccount(self.keeper.clear_account(msg)?)),
            Msg::SetAllowedDenoms(msg) => Ok(MsgResponse::SetAllowedDenoms(
                self.keeper.set_allowed_denoms(msg)?,
            )),
            Msg::Send(msg) => {
                self.send(msg)?;
                Ok(MsgResponse::Send)
            }
        }
    }

    fn send(&self, msg: &MsgSend) -> Result<(), NodeError> {
        let from = self.host.codec.decode(&msg.from)?;
        let to = self.host.codec.decode(&msg.to)?;
        self.host.bank.send_coins(&from, &to, &msg.amount)?;
        Ok(())
    }

    /// Hand an inbound packet to the middleware stack.
    ///
    /// An error acknowledgement undoes whatever the stack wrote for the packet.
    pub fn recv_packet(&self, packet: &Packet, relayer: &Address) -> Acknowledgement {
        let checkpoint = match self.checkpoint() {
            Ok(checkpoint) => checkpoint,
            Err(err) => return Acknowledgement::error(err),
        };
        self.keeper.hold_events();
        let ack = self.middleware.on_recv_packet(packet, relayer);
        if ack.is_success() {
            self.keeper.release_events();
        } else {
            self.keeper.discard_events();
            if let Err(err) = self.rollback(checkpoint) {
                error!(error = %err, "unable to roll back failed packet");
            }
        }
        ack
    }

    /// End-of-cycle hook: sweep every queued account.
    pub fn end_block(&self) {
        self.keeper.execute_forwards();
    }

    /// Cycle boundary: the pending-forward queue does not outlive its cycle.
    pub fn commit(&self) -> Result<(), NodeError> {
        self.transient.clear_pending()?;
        Ok(())
    }
}
