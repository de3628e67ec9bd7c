//! Universal (32-byte) address <-> local bech32 account conversion
//!
//! Cross-chain messages carry every address as 32 bytes. Local accounts are
//! 20-byte bech32 addresses left-padded with 12 zero bytes; contract
//! addresses use all 32 bytes.
//!
//! ```text
//! | 0x00 * 12 | raw account (20 bytes) |      account
//! |        raw contract (32 bytes)     |      contract
//! ```

use bech32::{FromBase32, ToBase32, Variant};
use cosmwasm_std::{StdError, StdResult};

/// Zero bytes that prefix a 20-byte account in universal form
const ACCOUNT_PADDING: usize = 12;

/// Render a universal address as a bech32 string with prefix `hrp`.
pub fn encode(bytes: &[u8; 32], hrp: &str) -> StdResult<String> {
    let raw: &[u8] = if bytes[..ACCOUNT_PADDING].iter().all(|b| *b == 0) {
        &bytes[ACCOUNT_PADDING..]
    } else {
        &bytes[..]
    };
    bech32::encode(hrp, raw.to_base32(), Variant::Bech32)
        .map_err(|e| StdError::generic_err(format!("Failed to encode bech32: {}", e)))
}

/// Parse a bech32 account or contract address into universal form.
///
/// The checksum is verified; the prefix is returned alongside the bytes.
pub fn decode(addr: &str) -> StdResult<(String, [u8; 32])> {
    // local accounts are always lowercase
    if addr.to_lowercase() != addr {
        return Err(StdError::generic_err("Bech32 address must be lowercase"));
    }
    let (hrp, data, variant) = bech32::decode(addr)
        .map_err(|e| StdError::generic_err(format!("Invalid bech32 address: {}", e)))?;
    if variant != Variant::Bech32 {
        return Err(StdError::generic_err("Invalid bech32 address: bech32m encoding"));
    }
    let raw = Vec::<u8>::from_base32(&data)
        .map_err(|e| StdError::generic_err(format!("Invalid base32 data: {}", e)))?;

    let mut out = [0u8; 32];
    match raw.len() {
        20 => out[ACCOUNT_PADDING..].copy_from_slice(&raw),
        32 => out.copy_from_slice(&raw),
        len => {
            return Err(StdError::generic_err(format!(
                "Invalid address length: expected 20 or 32 bytes, got {}",
                len
            )))
        }
    }
    Ok((hrp, out))
}
