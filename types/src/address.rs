//! Account address type and the codec seam for its string form.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length in bytes of every account address on the host ledger.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address.
///
/// Forwarding addresses are derived, never chosen; see `forwarding_crypto::forwarding_address`.
/// The human-readable form is produced by an [`AddressCodec`], which is owned by the host.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address from a slice, rejecting anything that is not exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        let arr: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| TypesError::InvalidAddressLength(bytes.len()))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", &self.to_hex()[..8])
    }
}

/// String ⇄ bytes conversion for addresses.
///
/// Supplied by the host ledger; the forwarding module only ever goes through this trait
/// when it needs to compare or print an address.
pub trait AddressCodec: Send + Sync {
    fn encode(&self, address: &Address) -> String;
    fn decode(&self, text: &str) -> Result<Address, TypesError>;
}
