//! End-of-cycle sweep.

use crate::Keeper;
use forwarding_messages::MsgTransfer;
use forwarding_types::{ChannelState, Coin, ForwardingAccount, TRANSFER_PORT};

impl Keeper {
    /// Forward the balance of every queued account to its recipient.
    ///
    /// Runs once per cycle and never fails: a closed channel skips the account, a
    /// disallowed denom skips that asset, and a failed transfer is logged. Each
    /// asset is handled on its own, so one failure does not hold back the rest.
    pub fn execute_forwards(&self) {
        let forwards = match self.pending_forwards() {
            Ok(forwards) => forwards,
            Err(e) => {
                tracing::error!(error = %e, "unable to read pending forwards");
                return;
            }
        };
        if !forwards.is_empty() {
            tracing::info!("executing {} automatic forward(s)", forwards.len());
        }

        for forward in &forwards {
            self.execute_forward(forward);
        }
    }

    fn execute_forward(&self, forward: &ForwardingAccount) {
        let sender = self.host.codec.encode(forward.address());

        let state = self
            .host
            .channels
            .get_channel(TRANSFER_PORT, &forward.channel)
            .map(|channel| channel.state)
            .unwrap_or(ChannelState::Uninitialized);
        if !state.is_open() {
            tracing::error!(
                channel = %forward.channel,
                address = %sender,
                state = %state,
                "skipped automatic forward due to non open channel"
            );
            return;
        }

        let timeout = self
            .host
            .header
            .header()
            .time_nanos
            .saturating_add(self.packet_timeout_nanos());

        for coin in self.host.bank.get_all_balances(forward.address()) {
            match self.is_allowed_denom(&coin.denom) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::error!(denom = %coin.denom, error = %e, "unable to read allowed denoms");
                    continue;
                }
            }

            let msg = MsgTransfer {
                source_port: TRANSFER_PORT.to_string(),
                source_channel: forward.channel.clone(),
                token: coin.clone(),
                sender: sender.clone(),
                receiver: forward.recipient.clone(),
                timeout_height: 0,
                timeout_timestamp: timeout,
                memo: String::new(),
            };

            // TODO: persist failed forwards so they can be retried in a later cycle.
            match self.host.transfer.transfer(&msg) {
                Ok(sequence) => self.record_forward(&forward.channel, &coin, sequence),
                Err(e) => tracing::error!(
                    channel = %forward.channel,
                    address = %sender,
                    amount = %coin,
                    error = %e,
                    "unable to execute automatic forward"
                ),
            }
        }
    }

    fn record_forward(&self, channel: &str, coin: &Coin, sequence: u64) {
        let result = self
            .increment_num_of_forwards(channel)
            .and_then(|_| self.increment_total_forwarded(channel, coin));
        match result {
            Ok(()) => tracing::debug!(channel, amount = %coin, sequence, "forwarded"),
            Err(e) => tracing::error!(channel, amount = %coin, error = %e, "unable to record forward"),
        }
    }
}
