//! Query handlers for the token bridge relayer contract.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;
use relay_common::{AssetInfo, RelayPayload};

use crate::msg::{
    AcceptedTokensResponse, ConfigResponse, ForeignContractEntry, ForeignContractResponse,
    ForeignContractsResponse, IsAcceptedTokenResponse, MaxNativeSwapAmountResponse,
    NativeSwapRateResponse, PendingOwnerResponse, RelayPayloadResponse, RelayerFeeResponse,
    StatsResponse, SwapAmountResponse, TokenDecimalsResponse,
};
use crate::execute::asset_decimals;
use crate::relay::{max_swap_amount_in, native_swap_amount_out};
use crate::state::{
    foreign_contract, is_accepted_token, max_native_swap_amount, native_swap_rate, relayer_fee,
    ACCEPTED_TOKENS, CONFIG, FOREIGN_CONTRACTS, PENDING_OWNER, STATS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        token_bridge: config.token_bridge,
        chain_id: config.chain_id,
        native_denom: config.native_denom,
        native_decimals: config.native_decimals,
        address_prefix: config.address_prefix,
        swap_rate_precision: config.swap_rate_precision,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        transfers_initiated: stats.transfers_initiated,
        redemptions_completed: stats.redemptions_completed,
        self_redemptions: stats.self_redemptions,
        native_swaps: stats.native_swaps,
    })
}

// ============================================================================
// Registry Queries
// ============================================================================

pub fn query_is_accepted_token(
    deps: Deps,
    chain_id: u16,
    token: AssetInfo,
) -> StdResult<IsAcceptedTokenResponse> {
    Ok(IsAcceptedTokenResponse {
        accepted: is_accepted_token(deps.storage, chain_id, token.key()),
    })
}

/// List accepted tokens of a chain, paginated by token key.
pub fn query_accepted_tokens(
    deps: Deps,
    chain_id: u16,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AcceptedTokensResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens = ACCEPTED_TOKENS
        .prefix(chain_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, asset)| asset))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AcceptedTokensResponse { chain_id, tokens })
}

pub fn query_token_decimals(deps: Deps, token: AssetInfo) -> StdResult<TokenDecimalsResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(TokenDecimalsResponse {
        decimals: asset_decimals(deps.storage, &deps.querier, &token, &config)?,
    })
}

pub fn query_relayer_fee(
    deps: Deps,
    chain_id: u16,
    token: AssetInfo,
) -> StdResult<RelayerFeeResponse> {
    Ok(RelayerFeeResponse {
        fee: relayer_fee(deps.storage, chain_id, token.key())?,
    })
}

pub fn query_native_swap_rate(
    deps: Deps,
    chain_id: u16,
    token: AssetInfo,
) -> StdResult<NativeSwapRateResponse> {
    Ok(NativeSwapRateResponse {
        rate: native_swap_rate(deps.storage, chain_id, token.key())?,
    })
}

pub fn query_max_native_swap_amount(
    deps: Deps,
    chain_id: u16,
    token: AssetInfo,
) -> StdResult<MaxNativeSwapAmountResponse> {
    Ok(MaxNativeSwapAmountResponse {
        amount: max_native_swap_amount(deps.storage, chain_id, token.key())?,
    })
}

pub fn query_foreign_contract(deps: Deps, chain_id: u16) -> StdResult<ForeignContractResponse> {
    Ok(ForeignContractResponse {
        chain_id,
        address: foreign_contract(deps.storage, chain_id)?.map(|a| Binary::from(a.to_vec())),
    })
}

pub fn query_foreign_contracts(
    deps: Deps,
    start_after: Option<u16>,
    limit: Option<u32>,
) -> StdResult<ForeignContractsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let contracts = FOREIGN_CONTRACTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(|(chain_id, address)| ForeignContractEntry {
                chain_id,
                address: Binary::from(address.to_vec()),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ForeignContractsResponse { contracts })
}

// ============================================================================
// Swap Queries
// ============================================================================

/// Largest token amount a redemption of `token` can convert to native gas.
pub fn query_max_swap_amount_in(deps: Deps, token: AssetInfo) -> StdResult<SwapAmountResponse> {
    let config = CONFIG.load(deps.storage)?;
    let key = token.key();
    Ok(SwapAmountResponse {
        amount: max_swap_amount_in(
            max_native_swap_amount(deps.storage, config.chain_id, key)?,
            native_swap_rate(deps.storage, config.chain_id, key)?,
            config.swap_rate_precision,
        ),
    })
}

/// Native gas a relayer must attach to swap `to_native_amount` of `token`.
pub fn query_native_swap_amount_out(
    deps: Deps,
    token: AssetInfo,
    to_native_amount: Uint128,
) -> StdResult<SwapAmountResponse> {
    let config = CONFIG.load(deps.storage)?;
    let key = token.key();
    if !is_accepted_token(deps.storage, config.chain_id, key) {
        return Err(StdError::generic_err(format!("Token not registered: {}", key)));
    }

    let cap = max_native_swap_amount(deps.storage, config.chain_id, key)?;
    let rate = native_swap_rate(deps.storage, config.chain_id, key)?;
    let to_native_amount = to_native_amount.min(max_swap_amount_in(
        cap,
        rate,
        config.swap_rate_precision,
    ));

    Ok(SwapAmountResponse {
        amount: native_swap_amount_out(to_native_amount, rate, config.swap_rate_precision, cap),
    })
}

pub fn query_decode_payload(payload: Binary) -> StdResult<RelayPayloadResponse> {
    let payload = RelayPayload::deserialize(payload.as_slice())
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(RelayPayloadResponse {
        target_relayer_fee: payload.target_relayer_fee,
        to_native_token_amount: payload.to_native_token_amount,
        target_recipient: Binary::from(payload.target_recipient.to_vec()),
    })
}
