//! Message types for the token bridge relayer contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Cw20ReceiveMsg;
use relay_common::AssetInfo;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for registry management
    pub owner: String,
    /// Token bridge contract address
    pub token_bridge: String,
    /// Local chain id in the bridge's numbering (non-zero)
    pub chain_id: u16,
    /// Native gas denom used for swaps (e.g. "uluna")
    pub native_denom: String,
    pub native_decimals: u8,
    /// Bech32 prefix of local accounts (e.g. "terra")
    pub address_prefix: String,
    /// Scale factor applied to native swap rates
    pub swap_rate_precision: Uint128,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Transfers
    // ========================================================================
    /// Start a relayed transfer of a CW20 token (called via CW20 send)
    Receive(Cw20ReceiveMsg),

    /// Start a relayed transfer of a native coin.
    /// Exactly one coin of a registered denom must be attached.
    WrapAndTransferWithRelay {
        /// Portion to swap into native gas on arrival (local decimals)
        to_native_token_amount: Uint128,
        target_chain: u16,
        /// Recipient on the target chain (32-byte universal address)
        target_recipient: Binary,
        /// Passed through to the messaging layer as the nonce
        batch_id: u32,
    },

    /// Redeem a delivered transfer. A relayer attaches the native gas that
    /// funds the recipient's swap; the recipient redeeming for themselves
    /// attaches nothing.
    CompleteTransferWithRelay { vaa: Binary },

    // ========================================================================
    // Registry (owner only)
    // ========================================================================
    /// Accept `token` for transfers involving `chain_id`. `decimals` applies
    /// to bank denoms only and defaults to the native decimals; CW20
    /// decimals are read from the token contract.
    RegisterToken {
        chain_id: u16,
        token: AssetInfo,
        decimals: Option<u8>,
    },

    DeregisterToken { chain_id: u16, token: AssetInfo },

    /// Trust `address` as the relayer contract of `chain_id`
    RegisterForeignContract { chain_id: u16, address: Binary },

    /// Relayer fee in the token's local decimals
    UpdateRelayerFee {
        chain_id: u16,
        token: AssetInfo,
        fee: Uint128,
    },

    /// Native units per token unit, scaled by the swap rate precision
    UpdateNativeSwapRate {
        chain_id: u16,
        token: AssetInfo,
        rate: Uint128,
    },

    /// Cap on native units paid out by one redemption
    UpdateMaxNativeSwapAmount {
        chain_id: u16,
        token: AssetInfo,
        amount: Uint128,
    },

    UpdateSwapRatePrecision { precision: Uint128 },

    // ========================================================================
    // Ownership
    // ========================================================================
    SubmitOwnershipTransfer { new_owner: String },

    /// Called by the proposed owner
    ConfirmOwnershipTransfer {},

    CancelOwnershipTransfer {},
}

/// Hook message embedded in a CW20 `Send`
#[cw_serde]
pub enum ReceiveMsg {
    TransferTokensWithRelay {
        to_native_token_amount: Uint128,
        target_chain: u16,
        target_recipient: Binary,
        batch_id: u32,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(PendingOwnerResponse)]
    PendingOwner {},

    #[returns(StatsResponse)]
    Stats {},

    #[returns(IsAcceptedTokenResponse)]
    IsAcceptedToken { chain_id: u16, token: AssetInfo },

    /// Accepted tokens of one chain, ordered by token key
    #[returns(AcceptedTokensResponse)]
    AcceptedTokens {
        chain_id: u16,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Decimals the contract normalizes `token` with
    #[returns(TokenDecimalsResponse)]
    TokenDecimals { token: AssetInfo },

    #[returns(RelayerFeeResponse)]
    RelayerFee { chain_id: u16, token: AssetInfo },

    #[returns(NativeSwapRateResponse)]
    NativeSwapRate { chain_id: u16, token: AssetInfo },

    #[returns(MaxNativeSwapAmountResponse)]
    MaxNativeSwapAmount { chain_id: u16, token: AssetInfo },

    #[returns(ForeignContractResponse)]
    ForeignContract { chain_id: u16 },

    #[returns(ForeignContractsResponse)]
    ForeignContracts {
        start_after: Option<u16>,
        limit: Option<u32>,
    },

    /// Largest token amount a redemption of `token` can swap into native gas
    #[returns(SwapAmountResponse)]
    MaxSwapAmountIn { token: AssetInfo },

    /// Native units a relayer must attach to swap `to_native_amount` tokens
    #[returns(SwapAmountResponse)]
    NativeSwapAmountOut {
        token: AssetInfo,
        to_native_amount: Uint128,
    },

    /// Parse a raw relay payload
    #[returns(RelayPayloadResponse)]
    DecodePayload { payload: Binary },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub token_bridge: Addr,
    pub chain_id: u16,
    pub native_denom: String,
    pub native_decimals: u8,
    pub address_prefix: String,
    pub swap_rate_precision: Uint128,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}

#[cw_serde]
pub struct StatsResponse {
    pub transfers_initiated: u64,
    pub redemptions_completed: u64,
    pub self_redemptions: u64,
    pub native_swaps: u64,
}

#[cw_serde]
pub struct IsAcceptedTokenResponse {
    pub accepted: bool,
}

#[cw_serde]
pub struct AcceptedTokensResponse {
    pub chain_id: u16,
    pub tokens: Vec<AssetInfo>,
}

#[cw_serde]
pub struct TokenDecimalsResponse {
    pub decimals: u8,
}

#[cw_serde]
pub struct RelayerFeeResponse {
    pub fee: Uint128,
}

#[cw_serde]
pub struct NativeSwapRateResponse {
    pub rate: Uint128,
}

#[cw_serde]
pub struct MaxNativeSwapAmountResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct ForeignContractResponse {
    pub chain_id: u16,
    pub address: Option<Binary>,
}

#[cw_serde]
pub struct ForeignContractEntry {
    pub chain_id: u16,
    pub address: Binary,
}

#[cw_serde]
pub struct ForeignContractsResponse {
    pub contracts: Vec<ForeignContractEntry>,
}

#[cw_serde]
pub struct SwapAmountResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct RelayPayloadResponse {
    /// Relayer fee, 8 decimals
    pub target_relayer_fee: Uint128,
    /// Swap amount, 8 decimals
    pub to_native_token_amount: Uint128,
    pub target_recipient: Binary,
}
