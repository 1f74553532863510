//! Message handlers: registration, clearing and denom policy.

use crate::events::ForwardingEvent;
use crate::{ForwardingError, Keeper};
use forwarding_crypto::forwarding_address;
use forwarding_messages::{
    MsgClearAccount, MsgClearAccountResponse, MsgRegisterAccount, MsgRegisterAccountResponse,
    MsgSetAllowedDenoms, MsgSetAllowedDenomsResponse,
};
use forwarding_types::{
    is_valid_channel_id, validate_allowed_denoms, Account, Address, TRANSFER_PORT,
};

/// Decide whether an existing account may become (or stay) a forwarding account.
///
/// Eligible: an untouched account (no credential, sequence zero), or one holding a
/// signerless key bound to `address`, at any sequence.
pub fn validate_account_fields(
    account: &Account,
    address: &Address,
    address_str: &str,
) -> Result<(), ForwardingError> {
    let credential = account.credential();
    let is_new_account = credential.is_none() && account.sequence() == 0;
    let is_signerless = credential.is_some_and(|c| c.is_signerless_for(address));

    if !is_new_account && !is_signerless {
        return Err(ForwardingError::ExistingUserAccount(address_str.to_string()));
    }
    Ok(())
}

impl Keeper {
    pub fn register_account(
        &self,
        msg: &MsgRegisterAccount,
    ) -> Result<MsgRegisterAccountResponse, ForwardingError> {
        if !is_valid_channel_id(&msg.channel) {
            return Err(ForwardingError::InvalidChannel);
        }
        if !msg.fallback.is_empty() && self.host.codec.decode(&msg.fallback).is_err() {
            return Err(ForwardingError::InvalidFallback);
        }

        let address = forwarding_address(&msg.channel, &msg.recipient, &msg.fallback);
        let address_str = self.host.codec.encode(&address);

        let channel = self
            .host
            .channels
            .get_channel(TRANSFER_PORT, &msg.channel)
            .ok_or_else(|| ForwardingError::ChannelNotFound(msg.channel.clone()))?;
        if !channel.state.is_open() {
            return Err(ForwardingError::ChannelNotOpen {
                channel: msg.channel.clone(),
                state: channel.state.to_string(),
            });
        }

        let height = self.host.header.header().height;
        let fallback = Some(msg.fallback.clone());
        let response = MsgRegisterAccountResponse {
            address: address_str.clone(),
        };

        let account = match self.host.accounts.get_account(&address) {
            Some(existing) => {
                validate_account_fields(&existing, &address, &address_str)?;

                let account = match existing {
                    Account::Base(base) => {
                        let upgraded = Account::Base(base).into_forwarding(
                            &msg.channel,
                            &msg.recipient,
                            fallback,
                            height,
                        )?;
                        self.host.accounts.set_account(upgraded.clone().into());
                        self.increment_num_of_accounts(&msg.channel)?;
                        upgraded
                    }
                    Account::Forwarding(account) => {
                        let signerless = account
                            .base
                            .credential
                            .as_ref()
                            .is_some_and(|c| c.is_signerless_for(&address));
                        if !signerless {
                            return Err(ForwardingError::AlreadyRegistered);
                        }
                        // Repeat of a signerless registration: nothing to change.
                        if !self.host.bank.get_all_balances(&address).is_zero() {
                            self.set_pending_forward(&account);
                        }
                        tracing::debug!(address = %address_str, "forwarding account already registered");
                        return Ok(response);
                    }
                };

                if !self.host.bank.get_all_balances(&address).is_zero() {
                    self.set_pending_forward(&account);
                }
                account
            }
            None => {
                let account = self
                    .host
                    .accounts
                    .new_account_with_address(&address)
                    .into_forwarding(&msg.channel, &msg.recipient, fallback, height)?;
                self.host.accounts.set_account(account.clone().into());
                self.increment_num_of_accounts(&msg.channel)?;
                account
            }
        };

        self.emit(ForwardingEvent::AccountRegistered {
            address: address_str,
            channel: account.channel.clone(),
            recipient: account.recipient.clone(),
            fallback: account.fallback_str().to_string(),
        });
        Ok(response)
    }

    /// Clear a forwarding account: queue it for the sweep, or, when asked and a
    /// fallback is configured, send the whole balance to the fallback right now.
    ///
    /// Any signer may clear any account.
    pub fn clear_account(
        &self,
        msg: &MsgClearAccount,
    ) -> Result<MsgClearAccountResponse, ForwardingError> {
        let address = self
            .host
            .codec
            .decode(&msg.address)
            .map_err(|_| ForwardingError::InvalidAccountAddress)?;

        let account = match self.host.accounts.get_account(&address) {
            None => return Err(ForwardingError::AccountNotFound),
            Some(Account::Base(_)) => return Err(ForwardingError::NotForwardingAccount),
            Some(Account::Forwarding(account)) => account,
        };

        let balance = self.host.bank.get_all_balances(&address);
        if balance.is_zero() {
            return Err(ForwardingError::NothingToClear);
        }

        let fallback = match (&account.fallback, msg.fallback) {
            (Some(fallback), true) => fallback.clone(),
            _ => {
                self.set_pending_forward(&account);
                return Ok(MsgClearAccountResponse {});
            }
        };

        let fallback_address = self
            .host
            .codec
            .decode(&fallback)
            .map_err(|e| ForwardingError::UndecodableFallback(e.to_string()))?;
        self.host
            .bank
            .send_coins(&address, &fallback_address, &balance)
            .map_err(|e| {
                tracing::warn!(address = %msg.address, error = %e, "fallback transfer failed");
                ForwardingError::FallbackTransferFailed
            })?;

        self.emit(ForwardingEvent::AccountCleared {
            address: msg.address.clone(),
            recipient: fallback,
        });
        Ok(MsgClearAccountResponse {})
    }

    /// Replace the allowed-denom set wholesale. Authority only.
    pub fn set_allowed_denoms(
        &self,
        msg: &MsgSetAllowedDenoms,
    ) -> Result<MsgSetAllowedDenomsResponse, ForwardingError> {
        if msg.signer != self.authority() {
            return Err(ForwardingError::InvalidAuthority {
                expected: self.authority().to_string(),
                got: msg.signer.clone(),
            });
        }
        validate_allowed_denoms(&msg.denoms)
            .map_err(|e| ForwardingError::InvalidDenoms(e.to_string()))?;

        let previous = self.store.allowed_denoms()?;
        self.store.clear_allowed_denoms()?;
        for denom in &msg.denoms {
            self.store.insert_allowed_denom(denom)?;
        }

        self.emit(ForwardingEvent::AllowedDenomsConfigured {
            previous,
            current: msg.denoms.clone(),
        });
        Ok(MsgSetAllowedDenomsResponse {})
    }
}
