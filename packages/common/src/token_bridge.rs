//! Message interface of the external token bridge contract.
//!
//! The relayer never verifies cross-chain messages itself. It asks the bridge
//! to parse a delivered message (`TransferInfo`) and later to settle it
//! (`CompleteTransferWithPayload`), which fails if the message was already
//! redeemed or does not name the calling contract as recipient.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::asset::{Asset, AssetInfo};

/// Response attribute carrying the outbound message sequence.
pub const SEQUENCE_ATTRIBUTE: &str = "sequence";

#[cw_serde]
pub enum TokenBridgeExecuteMsg {
    /// Lock or burn `asset` and publish a transfer carrying `payload`.
    ///
    /// CW20 assets are pulled from the caller through an allowance; native
    /// assets must be attached as funds. The bridge responds with a
    /// `sequence` attribute.
    InitiateTransferWithPayload {
        asset: Asset,
        recipient_chain: u16,
        /// 32-byte contract address on the target chain
        recipient: Binary,
        fee: Uint128,
        payload: Binary,
        nonce: u32,
    },

    /// Redeem a delivered transfer. Tokens are released to the caller, which
    /// must be the transfer's recipient.
    CompleteTransferWithPayload {
        data: Binary,
        relayer: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum TokenBridgeQueryMsg {
    /// Verify and parse a delivered transfer without redeeming it.
    #[returns(TransferInfoResponse)]
    TransferInfo { vaa: Binary },
}

/// Parsed contents of a verified transfer-with-payload message.
#[cw_serde]
pub struct TransferInfoResponse {
    /// Transferred amount, normalized to 8 decimals
    pub amount: Uint128,
    /// Token address on its origin chain
    pub token_address: Binary,
    pub token_chain: u16,
    /// The asset the bridge releases on this chain
    pub local_asset: AssetInfo,
    /// Chain the message was emitted from
    pub emitter_chain: u16,
    /// 32-byte address of the contract that initiated the transfer
    pub sender: Binary,
    /// 32-byte address of the intended redeeming contract
    pub recipient: Binary,
    pub recipient_chain: u16,
    /// Opaque application payload
    pub payload: Binary,
}
