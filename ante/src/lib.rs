//! Transaction authentication pipeline.
//!
//! A chain of [`AnteDecorator`]s runs before any message handler. Each decorator
//! either rejects the transaction or calls `next`. Forwarding plugs two pieces
//! into the ordinary pipeline:
//!
//! 1. [`sig_verification_gas_consumer`]: no signature gas for a signerless key
//! 2. [`SigVerificationDecorator`]: skips signature verification for a lone,
//!    funded, self-signed registration
//!
//! [`new_ante_handler`] assembles the full chain in its required order.

pub mod chain;
pub mod decorators;
pub mod error;
pub mod forwarding;

pub use chain::{AnteChain, AnteContext, AnteDecorator, AnteHandler, GasMeter};
pub use decorators::{
    default_sig_verification_gas_consumer, AuthParams, IncrementSequenceDecorator,
    SetCredentialDecorator, SigGasConsumeDecorator, SigGasConsumer,
    StandardSigVerificationDecorator,
};
pub use error::AnteError;
pub use forwarding::{sig_verification_gas_consumer, SigVerificationDecorator};

use forwarding_host::{AccountKeeper, BankKeeper};
use forwarding_types::AddressCodec;
use std::sync::Arc;

/// The authentication chain with forwarding's pieces in place:
/// set credential → signature gas → (bypass or) verify → increment sequence.
pub fn new_ante_handler(
    accounts: Arc<dyn AccountKeeper>,
    bank: Arc<dyn BankKeeper>,
    codec: Arc<dyn AddressCodec>,
    params: AuthParams,
) -> AnteChain {
    let standard = StandardSigVerificationDecorator::new(accounts.clone(), codec.clone());
    AnteChain::new(vec![
        Box::new(SetCredentialDecorator::new(accounts.clone(), codec.clone())),
        Box::new(SigGasConsumeDecorator::new(
            params,
            sig_verification_gas_consumer,
        )),
        Box::new(SigVerificationDecorator::new(
            bank,
            codec.clone(),
            Box::new(standard),
        )),
        Box::new(IncrementSequenceDecorator::new(accounts, codec)),
    ])
}
