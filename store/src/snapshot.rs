//! Branching: capture a store's state and put it back.
//!
//! The host runs every transaction on a branch of its state. When a step fails,
//! each store is restored from the snapshot taken before the step began.

use crate::StoreError;
use std::any::Any;

/// Saved state of one store. Only the store that produced it can read it back.
pub struct Snapshot(Box<dyn Any + Send>);

impl Snapshot {
    pub fn new<T: Any + Send>(state: T) -> Self {
        Self(Box::new(state))
    }

    pub fn into_state<T: Any>(self) -> Result<T, StoreError> {
        self.0
            .downcast::<T>()
            .map(|state| *state)
            .map_err(|_| StoreError::ForeignSnapshot)
    }
}

/// State that can be captured and restored wholesale.
pub trait Revertible {
    fn snapshot(&self) -> Result<Snapshot, StoreError>;

    /// Put back a snapshot previously taken from this same store.
    fn restore(&self, snapshot: Snapshot) -> Result<(), StoreError>;
}
