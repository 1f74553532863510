//! The ordinary authentication decorators.

use crate::chain::{signers_with_signatures, AnteContext, AnteDecorator, AnteHandler, GasMeter};
use crate::AnteError;
use forwarding_crypto::{address_from_public_key, verify_credential};
use forwarding_host::AccountKeeper;
use forwarding_messages::{SignDoc, SignatureV2, Tx};
use forwarding_types::{Account, Address, AddressCodec, Credential};
use std::sync::Arc;
use tracing::debug;

/// Authentication parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthParams {
    pub sig_verify_cost_ed25519: u64,
}

impl Default for AuthParams {
    fn default() -> Self {
        Self {
            sig_verify_cost_ed25519: 590,
        }
    }
}

/// Charges gas for verifying one signature.
pub type SigGasConsumer = fn(&mut GasMeter, &SignatureV2, &AuthParams) -> Result<(), AnteError>;

/// Charges Ed25519 verification and refuses every other credential kind.
pub fn default_sig_verification_gas_consumer(
    meter: &mut GasMeter,
    sig: &SignatureV2,
    params: &AuthParams,
) -> Result<(), AnteError> {
    match &sig.credential {
        Credential::Ed25519(_) => {
            meter.consume(params.sig_verify_cost_ed25519, "ante verify: ed25519")
        }
        other => Err(AnteError::UnrecognizedCredential(other.kind().to_string())),
    }
}

fn is_bound_to(credential: &Credential, address: &Address) -> bool {
    match credential {
        Credential::Ed25519(public_key) => address_from_public_key(public_key) == *address,
        Credential::Signerless(key) => key.address == *address,
    }
}

fn load_account(
    accounts: &dyn AccountKeeper,
    address: &Address,
    signer: &str,
) -> Result<Account, AnteError> {
    accounts
        .get_account(address)
        .ok_or_else(|| AnteError::UnknownAccount(signer.to_string()))
}

/// Stores the presented credential on signer accounts that do not have one yet.
pub struct SetCredentialDecorator {
    accounts: Arc<dyn AccountKeeper>,
    codec: Arc<dyn AddressCodec>,
}

impl SetCredentialDecorator {
    pub fn new(accounts: Arc<dyn AccountKeeper>, codec: Arc<dyn AddressCodec>) -> Self {
        Self { accounts, codec }
    }
}

impl AnteDecorator for SetCredentialDecorator {
    fn ante_handle(
        &self,
        ctx: &mut AnteContext,
        tx: &Tx,
        simulate: bool,
        next: AnteHandler<'_>,
    ) -> Result<(), AnteError> {
        for (address, signer, sig) in signers_with_signatures(tx, self.codec.as_ref())? {
            if !is_bound_to(&sig.credential, &address) {
                return Err(AnteError::CredentialMismatch(signer.to_string()));
            }
            let mut account = load_account(self.accounts.as_ref(), &address, signer)?;
            if account.credential().is_some() {
                continue;
            }
            debug!(signer, kind = sig.credential.kind(), "setting account credential");
            account.set_credential(sig.credential.clone());
            self.accounts.set_account(account);
        }
        next(ctx, tx, simulate)
    }
}

/// Charges signature gas through a pluggable consumer.
pub struct SigGasConsumeDecorator {
    params: AuthParams,
    consumer: SigGasConsumer,
}

impl SigGasConsumeDecorator {
    pub fn new(params: AuthParams, consumer: SigGasConsumer) -> Self {
        Self { params, consumer }
    }
}

impl AnteDecorator for SigGasConsumeDecorator {
    fn ante_handle(
        &self,
        ctx: &mut AnteContext,
        tx: &Tx,
        simulate: bool,
        next: AnteHandler<'_>,
    ) -> Result<(), AnteError> {
        for sig in &tx.signatures {
            (self.consumer)(&mut ctx.gas_meter, sig, &self.params)?;
        }
        next(ctx, tx, simulate)
    }
}

/// Checks sequence numbers and verifies every signature against the stored credential.
pub struct StandardSigVerificationDecorator {
    accounts: Arc<dyn AccountKeeper>,
    codec: Arc<dyn AddressCodec>,
}

impl StandardSigVerificationDecorator {
    pub fn new(accounts: Arc<dyn AccountKeeper>, codec: Arc<dyn AddressCodec>) -> Self {
        Self { accounts, codec }
    }
}

impl AnteDecorator for StandardSigVerificationDecorator {
    fn ante_handle(
        &self,
        ctx: &mut AnteContext,
        tx: &Tx,
        simulate: bool,
        next: AnteHandler<'_>,
    ) -> Result<(), AnteError> {
        for (address, signer, sig) in signers_with_signatures(tx, self.codec.as_ref())? {
            let account = load_account(self.accounts.as_ref(), &address, signer)?;
            let credential = account
                .credential()
                .ok_or_else(|| AnteError::NoCredential(signer.to_string()))?;
            if sig.sequence != account.sequence() {
                return Err(AnteError::WrongSequence {
                    expected: account.sequence(),
                    got: sig.sequence,
                });
            }
            if simulate {
                continue;
            }
            let doc = SignDoc {
                chain_id: &ctx.chain_id,
                account_number: account.account_number(),
                sequence: sig.sequence,
                msgs: &tx.msgs,
                memo: &tx.memo,
            };
            if !verify_credential(credential, &doc.to_bytes(), &sig.signature) {
                return Err(AnteError::Unauthorized {
                    account_number: account.account_number(),
                    sequence: sig.sequence,
                    chain_id: ctx.chain_id.clone(),
                });
            }
        }
        next(ctx, tx, simulate)
    }
}

/// Bumps every signer's sequence.
pub struct IncrementSequenceDecorator {
    accounts: Arc<dyn AccountKeeper>,
    codec: Arc<dyn AddressCodec>,
}

impl IncrementSequenceDecorator {
    pub fn new(accounts: Arc<dyn AccountKeeper>, codec: Arc<dyn AddressCodec>) -> Self {
        Self { accounts, codec }
    }
}

impl AnteDecorator for IncrementSequenceDecorator {
    fn ante_handle(
        &self,
        ctx: &mut AnteContext,
        tx: &Tx,
        simulate: bool,
        next: AnteHandler<'_>,
    ) -> Result<(), AnteError> {
        for (address, signer, _) in signers_with_signatures(tx, self.codec.as_ref())? {
            let mut account = load_account(self.accounts.as_ref(), &address, signer)?;
            account.increment_sequence();
            self.accounts.set_account(account);
        }
        next(ctx, tx, simulate)
    }
}
