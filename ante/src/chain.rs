//! Decorator chain plumbing.

use crate::AnteError;
use forwarding_messages::{SignatureV2, Tx};
use forwarding_types::{Address, AddressCodec};

/// The rest of the chain, as seen by one decorator.
pub type AnteHandler<'a> = &'a dyn Fn(&mut AnteContext, &Tx, bool) -> Result<(), AnteError>;

/// One step of transaction authentication.
pub trait AnteDecorator: Send + Sync {
    /// Check `tx`, then either fail or hand over to `next`.
    fn ante_handle(
        &self,
        ctx: &mut AnteContext,
        tx: &Tx,
        simulate: bool,
        next: AnteHandler<'_>,
    ) -> Result<(), AnteError>;
}

/// Gas accounting for one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    consumed: u64,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self { limit, consumed: 0 }
    }

    pub fn consume(&mut self, amount: u64, descriptor: &str) -> Result<(), AnteError> {
        let used = self.consumed.saturating_add(amount);
        if used > self.limit {
            return Err(AnteError::OutOfGas {
                descriptor: descriptor.to_string(),
                limit: self.limit,
                used,
            });
        }
        self.consumed = used;
        Ok(())
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

/// State threaded through the chain.
#[derive(Clone, Debug)]
pub struct AnteContext {
    pub chain_id: String,
    pub gas_meter: GasMeter,
}

impl AnteContext {
    pub fn new(chain_id: impl Into<String>, gas_limit: u64) -> Self {
        Self {
            chain_id: chain_id.into(),
            gas_meter: GasMeter::new(gas_limit),
        }
    }
}

/// Ordered decorators; the last `next` accepts.
pub struct AnteChain {
    decorators: Vec<Box<dyn AnteDecorator>>,
}

impl AnteChain {
    pub fn new(decorators: Vec<Box<dyn AnteDecorator>>) -> Self {
        Self { decorators }
    }

    /// Run every decorator in order.
    ///
    /// Decorators write straight through to the account keeper, so a failed run
    /// can leave credentials or sequences behind. Callers run the chain on a
    /// branch of state and restore it on failure and after simulations.
    pub fn run(&self, ctx: &mut AnteContext, tx: &Tx, simulate: bool) -> Result<(), AnteError> {
        self.run_from(0, ctx, tx, simulate)
    }

    fn run_from(
        &self,
        index: usize,
        ctx: &mut AnteContext,
        tx: &Tx,
        simulate: bool,
    ) -> Result<(), AnteError> {
        let Some(decorator) = self.decorators.get(index) else {
            return Ok(());
        };
        let next = |ctx: &mut AnteContext, tx: &Tx, simulate: bool| {
            self.run_from(index + 1, ctx, tx, simulate)
        };
        decorator.ante_handle(ctx, tx, simulate, &next)
    }
}

/// Pair each distinct signer with its signature, in signer order.
pub(crate) fn signers_with_signatures<'a>(
    tx: &'a Tx,
    codec: &dyn AddressCodec,
) -> Result<Vec<(Address, &'a str, &'a SignatureV2)>, AnteError> {
    let signers = tx.signers();
    if tx.signatures.is_empty() {
        return Err(AnteError::NoSignatures);
    }
    if signers.len() != tx.signatures.len() {
        return Err(AnteError::SignerCountMismatch {
            expected: signers.len(),
            got: tx.signatures.len(),
        });
    }

    signers
        .into_iter()
        .zip(tx.signatures.iter())
        .map(|(signer, sig)| {
            let address = codec
                .decode(signer)
                .map_err(|_| AnteError::InvalidSigner(signer.to_string()))?;
            Ok((address, signer, sig))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Record {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        stop: bool,
    }

    impl AnteDecorator for Record {
        fn ante_handle(
            &self,
            ctx: &mut AnteContext,
            tx: &Tx,
            simulate: bool,
            next: AnteHandler<'_>,
        ) -> Result<(), AnteError> {
            self.log.lock().unwrap().push(self.name);
            if self.stop {
                return Err(AnteError::NoSignatures);
            }
            next(ctx, tx, simulate)
        }
    }

    fn empty_tx() -> Tx {
        Tx {
            msgs: vec![],
            signatures: vec![],
            memo: String::new(),
        }
    }

    #[test]
    fn decorators_run_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = AnteChain::new(vec![
            Box::new(Record { name: "a", log: log.clone(), stop: false }),
            Box::new(Record { name: "b", log: log.clone(), stop: false }),
        ]);
        chain
            .run(&mut AnteContext::new("noble-1", 100), &empty_tx(), false)
            .unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn failing_decorator_stops_the_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = AnteChain::new(vec![
            Box::new(Record { name: "a", log: log.clone(), stop: true }),
            Box::new(Record { name: "b", log: log.clone(), stop: false }),
        ]);
        assert!(chain
            .run(&mut AnteContext::new("noble-1", 100), &empty_tx(), false)
            .is_err());
        assert_eq!(*log.lock().unwrap(), vec!["a"]);
    }

    #[test]
    fn gas_meter_enforces_limit() {
        let mut meter = GasMeter::new(1000);
        meter.consume(590, "ante verify: ed25519").unwrap();
        let err = meter.consume(590, "ante verify: ed25519").unwrap_err();
        assert!(matches!(err, AnteError::OutOfGas { used: 1180, .. }));
        assert_eq!(meter.consumed(), 590);
    }
}
