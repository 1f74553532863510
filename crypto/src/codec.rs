//! Human-readable address form.
//!
//! Format: `<prefix>_` + base32(address, 32 chars) + base32(checksum, 8 chars)
//!
//! Checksum: first 5 bytes of Blake2b-256(address).
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (avoids ambiguous chars).

use forwarding_types::{Address, AddressCodec, TypesError, ADDRESS_LEN};

const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// 160 bits → 32 characters.
const ADDRESS_CHARS: usize = 32;
/// 40 bits → 8 characters.
const CHECKSUM_CHARS: usize = 8;
const CHECKSUM_LEN: usize = 5;

fn encode_base32(bytes: &[u8]) -> String {
    let num_chars = (bytes.len() * 8).div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = *BASE32_DECODE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < N {
        return None;
    }
    Some(result)
}

/// Checksummed base32 codec with a configurable human-readable prefix.
#[derive(Clone, Debug)]
pub struct Base32Codec {
    prefix: String,
}

impl Base32Codec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn checksum(address: &[u8; ADDRESS_LEN]) -> [u8; CHECKSUM_LEN] {
        let hash = crate::blake2b_256(address);
        let mut out = [0u8; CHECKSUM_LEN];
        out.copy_from_slice(&hash[..CHECKSUM_LEN]);
        out
    }
}

impl AddressCodec for Base32Codec {
    fn encode(&self, address: &Address) -> String {
        let body = encode_base32(address.as_bytes());
        let checksum = encode_base32(&Self::checksum(address.as_bytes()));
        format!("{}_{}{}", self.prefix, body, checksum)
    }

    fn decode(&self, text: &str) -> Result<Address, TypesError> {
        let invalid = || TypesError::InvalidAddress(text.to_string());

        let encoded = text
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .ok_or_else(invalid)?;
        if encoded.len() != ADDRESS_CHARS + CHECKSUM_CHARS || !encoded.is_ascii() {
            return Err(invalid());
        }

        let (body, checksum) = encoded.split_at(ADDRESS_CHARS);
        let bytes: [u8; ADDRESS_LEN] = decode_base32_fixed(body).ok_or_else(invalid)?;
        let checksum: [u8; CHECKSUM_LEN] = decode_base32_fixed(checksum).ok_or_else(invalid)?;
        if checksum != Self::checksum(&bytes) {
            return Err(invalid());
        }

        Ok(Address::new(bytes))
    }
}
