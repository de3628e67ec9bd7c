//! Relay payload codec.
//!
//! The relay payload rides inside the token bridge's transfer-with-payload
//! message. The bridge treats it as opaque bytes; only the relayer contracts
//! on either side interpret it.
//!
//! # Byte Layout (97 bytes total, big-endian)
//! - Byte 0:       payload id (always 1)
//! - Bytes 1-32:   target relayer fee (uint256, normalized to 8 decimals)
//! - Bytes 33-64:  amount to swap into native gas (uint256, normalized)
//! - Bytes 65-96:  target recipient (32-byte universal address)

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use thiserror::Error;

/// Marker byte identifying a relay payload.
pub const RELAY_PAYLOAD_ID: u8 = 1;

/// Serialized size of a relay payload.
pub const RELAY_PAYLOAD_LEN: usize = 1 + 32 + 32 + 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Malformed relay payload: expected {RELAY_PAYLOAD_LEN} bytes, got {len}")]
    MalformedPayload { len: usize },

    #[error("Unexpected payload kind: expected {RELAY_PAYLOAD_ID}, got {kind}")]
    UnexpectedPayloadKind { kind: u8 },

    #[error("Relay payload amount does not fit in 128 bits")]
    AmountOverflow,
}

/// Relay instructions attached to an outbound transfer.
#[cw_serde]
#[derive(Eq)]
pub struct RelayPayload {
    /// Fee owed to the relayer on the target chain (8 decimals)
    pub target_relayer_fee: Uint128,
    /// Portion of the transfer to convert into native gas (8 decimals)
    pub to_native_token_amount: Uint128,
    /// Final recipient on the target chain
    pub target_recipient: [u8; 32],
}

impl RelayPayload {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RELAY_PAYLOAD_LEN);
        out.push(RELAY_PAYLOAD_ID);
        out.extend_from_slice(&encode_u256(self.target_relayer_fee));
        out.extend_from_slice(&encode_u256(self.to_native_token_amount));
        out.extend_from_slice(&self.target_recipient);
        out
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, PayloadError> {
        if data.len() != RELAY_PAYLOAD_LEN {
            return Err(PayloadError::MalformedPayload { len: data.len() });
        }
        if data[0] != RELAY_PAYLOAD_ID {
            return Err(PayloadError::UnexpectedPayloadKind { kind: data[0] });
        }

        let target_relayer_fee = decode_u256(&data[1..33])?;
        let to_native_token_amount = decode_u256(&data[33..65])?;
        let mut target_recipient = [0u8; 32];
        target_recipient.copy_from_slice(&data[65..97]);

        Ok(Self {
            target_relayer_fee,
            to_native_token_amount,
            target_recipient,
        })
    }
}

/// Left-pad a u128 into a 32-byte big-endian word.
fn encode_u256(value: Uint128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.u128().to_be_bytes());
    word
}

/// Read a 32-byte big-endian word, rejecting values above u128::MAX.
fn decode_u256(word: &[u8]) -> Result<Uint128, PayloadError> {
    let (high, low) = word.split_at(16);
    if high.iter().any(|b| *b != 0) {
        return Err(PayloadError::AmountOverflow);
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(low);
    Ok(Uint128::new(u128::from_be_bytes(bytes)))
}
