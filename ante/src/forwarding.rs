//! Forwarding's hooks into the authentication chain.
//!
//! A forwarding address has no private key. Someone who has funded one can still
//! register it by submitting a transaction "signed" by the address itself: the
//! signature carries a signerless credential, costs no gas, and is never checked.
//! Everything else goes through ordinary verification.

use crate::chain::{AnteContext, AnteDecorator, AnteHandler, GasMeter};
use crate::decorators::{default_sig_verification_gas_consumer, AuthParams};
use crate::AnteError;
use forwarding_crypto::forwarding_address;
use forwarding_host::BankKeeper;
use forwarding_messages::{SignatureV2, Tx};
use forwarding_types::{AddressCodec, Credential};
use std::sync::Arc;
use tracing::debug;

/// Signerless keys are free; everything else is charged as usual.
pub fn sig_verification_gas_consumer(
    meter: &mut GasMeter,
    sig: &SignatureV2,
    params: &AuthParams,
) -> Result<(), AnteError> {
    match sig.credential {
        Credential::Signerless(_) => Ok(()),
        _ => default_sig_verification_gas_consumer(meter, sig, params),
    }
}

/// Wraps the standard verifier and lets a lone, funded, self-signed registration through.
pub struct SigVerificationDecorator {
    bank: Arc<dyn BankKeeper>,
    codec: Arc<dyn AddressCodec>,
    underlying: Box<dyn AnteDecorator>,
}

impl SigVerificationDecorator {
    pub fn new(
        bank: Arc<dyn BankKeeper>,
        codec: Arc<dyn AddressCodec>,
        underlying: Box<dyn AnteDecorator>,
    ) -> Self {
        Self {
            bank,
            codec,
            underlying,
        }
    }

    fn is_signerless_registration(&self, tx: &Tx) -> bool {
        let [msg] = tx.msgs.as_slice() else {
            return false;
        };
        let Some(msg) = msg.as_register_account() else {
            return false;
        };
        let address = forwarding_address(&msg.channel, &msg.recipient, &msg.fallback);
        if self.bank.get_all_balances(&address).is_zero() {
            return false;
        }
        msg.signer == self.codec.encode(&address)
    }
}

impl AnteDecorator for SigVerificationDecorator {
    fn ante_handle(
        &self,
        ctx: &mut AnteContext,
        tx: &Tx,
        simulate: bool,
        next: AnteHandler<'_>,
    ) -> Result<(), AnteError> {
        if self.is_signerless_registration(tx) {
            debug!("skipping signature verification for signerless registration");
            return next(ctx, tx, simulate);
        }
        self.underlying.ante_handle(ctx, tx, simulate, next)
    }
}
