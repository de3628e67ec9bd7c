//! Relay Common - Shared Types and Codecs for the Token Bridge Relayer
//!
//! This package provides the pieces of the relay protocol that do not touch
//! contract storage:
//! - `asset` - native denom / CW20 asset descriptors and payout messages
//! - `normalize` - 8-decimal cross-chain amount normalization
//! - `payload` - the 97-byte relay payload carried inside bridge transfers
//! - `token_bridge` - message types of the external token bridge contract

pub mod asset;
pub mod normalize;
pub mod payload;
pub mod token_bridge;

pub use asset::{Asset, AssetInfo};
pub use normalize::{denormalize, normalize, truncate_dust, NORMALIZED_DECIMALS};
pub use payload::{PayloadError, RelayPayload, RELAY_PAYLOAD_ID, RELAY_PAYLOAD_LEN};
