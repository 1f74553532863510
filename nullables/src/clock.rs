//! Nullable header: deterministic height and time for testing.

use forwarding_host::{Header, HeaderService};
use std::sync::Mutex;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A deterministic block header for testing.
///
/// Height and time only advance when you tell them to.
pub struct NullHeader {
    current: Mutex<Header>,
}

impl NullHeader {
    pub fn new(height: u64, time_secs: u64) -> Self {
        Self {
            current: Mutex::new(Header {
                height,
                time_nanos: time_secs * NANOS_PER_SEC,
            }),
        }
    }

    /// Move to the next block, `secs` seconds later.
    pub fn advance(&self, secs: u64) {
        let mut header = self.current.lock().unwrap();
        header.height += 1;
        header.time_nanos += secs * NANOS_PER_SEC;
    }

    pub fn set_height(&self, height: u64) {
        self.current.lock().unwrap().height = height;
    }
}

impl Default for NullHeader {
    fn default() -> Self {
        Self::new(1, 1_700_000_000)
    }
}

impl HeaderService for NullHeader {
    fn header(&self) -> Header {
        *self.current.lock().unwrap()
    }
}
