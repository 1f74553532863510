//! Events emitted by the message handlers.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Module events observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForwardingEvent {
    /// A forwarding account was created or upgraded from a plain account.
    AccountRegistered {
        address: String,
        channel: String,
        recipient: String,
        fallback: String,
    },
    /// A balance was handed to the fallback address.
    AccountCleared { address: String, recipient: String },
    AllowedDenomsConfigured {
        previous: Vec<String>,
        current: Vec<String>,
    },
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast to
/// avoid stalling message handling.
///
/// While held, events are buffered instead of delivered. The holder then either
/// releases them to the listeners or discards them, so a step that is rolled
/// back never reports what it did.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&ForwardingEvent) + Send + Sync>>,
    held: Mutex<Option<Vec<ForwardingEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            held: Mutex::new(None),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ForwardingEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &ForwardingEvent) {
        if let Some(buffer) = self.held().as_mut() {
            buffer.push(event.clone());
            return;
        }
        self.deliver(event);
    }

    /// Start buffering. Events already buffered are kept.
    pub fn hold(&self) {
        self.held().get_or_insert_with(Vec::new);
    }

    /// Stop buffering and deliver everything buffered, in order.
    pub fn release(&self) {
        let buffered = self.held().take().unwrap_or_default();
        for event in &buffered {
            self.deliver(event);
        }
    }

    /// Stop buffering and drop everything buffered.
    pub fn discard(&self) {
        self.held().take();
    }

    fn held(&self) -> MutexGuard<'_, Option<Vec<ForwardingEvent>>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, event: &ForwardingEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
