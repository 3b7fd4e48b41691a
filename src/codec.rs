// src/codec.rs
//! Conversions between 32-byte EVM words, addresses, integers and the hex
//! strings a JSON-RPC node hands back.

use alloy::primitives::{Address, Bytes, B256, U256};

use crate::error::{DecodeError, InputError};

/// Size of one ABI word / topic.
pub const WORD: usize = 32;

/// Number of zero bytes in front of an address packed into a word.
const ADDRESS_PADDING: usize = WORD - 20;

/// An address lives in the low 20 bytes of a topic. The high 12 bytes must be
/// zero, otherwise the topic was never an address.
pub fn parse_address(topic: &B256) -> Result<Address, DecodeError> {
    let (padding, addr) = topic.0.split_at(ADDRESS_PADDING);
    if padding.iter().any(|b| *b != 0) {
        return Err(DecodeError::MalformedTopic { value: *topic });
    }
    Ok(Address::from_slice(addr))
}

/// Big-endian unsigned read of the whole word.
pub fn parse_u256(word: &B256) -> U256 {
    U256::from_be_bytes(word.0)
}

/// The `index`-th 32-byte word of an ABI-encoded data blob.
pub fn slice_word(data: &[u8], index: usize) -> Result<B256, DecodeError> {
    let too_short = |needed| DecodeError::DataTooShort {
        needed,
        actual: data.len(),
    };
    let end = index
        .checked_mul(WORD)
        .and_then(|start| start.checked_add(WORD))
        .ok_or_else(|| too_short(usize::MAX))?;
    if data.len() < end {
        return Err(too_short(end));
    }
    Ok(B256::from_slice(&data[end - WORD..end]))
}

fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string, `0x` prefix optional.
pub fn decode_hex(field: &'static str, s: &str) -> Result<Vec<u8>, InputError> {
    hex::decode(strip_hex_prefix(s)).map_err(|e| InputError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// Decode a hex string that must be exactly `N` bytes. Never pads or truncates.
pub fn parse_fixed<const N: usize>(field: &'static str, s: &str) -> Result<[u8; N], InputError> {
    let bytes = decode_hex(field, s)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| InputError::WrongWidth {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

pub fn parse_b256(field: &'static str, s: &str) -> Result<B256, InputError> {
    parse_fixed::<32>(field, s).map(B256::from)
}

pub fn parse_address_hex(field: &'static str, s: &str) -> Result<Address, InputError> {
    parse_fixed::<20>(field, s).map(Address::from)
}

pub fn parse_data(s: &str) -> Result<Bytes, InputError> {
    decode_hex("data", s).map(Bytes::from)
}

/// JSON-RPC quantity: `0x`-prefixed hex, or a plain decimal string.
pub fn parse_quantity(field: &'static str, s: &str) -> Result<u64, InputError> {
    let trimmed = s.trim();
    let invalid = || InputError::InvalidQuantity {
        field,
        value: s.to_string(),
    };

    if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        let digits = strip_hex_prefix(trimmed);
        if digits.is_empty() {
            return Err(invalid());
        }
        u64::from_str_radix(digits, 16).map_err(|_| invalid())
    } else {
        trimmed.parse::<u64>().map_err(|_| invalid())
    }
}
