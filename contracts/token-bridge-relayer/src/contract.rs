//! Token Bridge Relayer Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `relay/` - Pure transfer and redemption planning

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_cancel_ownership_transfer, execute_complete_transfer_with_relay,
    execute_confirm_ownership_transfer, execute_deregister_token, execute_receive,
    execute_register_foreign_contract, execute_register_token, execute_submit_ownership_transfer,
    execute_update_max_native_swap_amount, execute_update_native_swap_rate,
    execute_update_relayer_fee, execute_update_swap_rate_precision, execute_wrap_and_transfer,
    handle_initiate_transfer_reply, INITIATE_TRANSFER_REPLY_ID,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_accepted_tokens, query_config, query_decode_payload, query_foreign_contract,
    query_foreign_contracts, query_is_accepted_token, query_max_native_swap_amount,
    query_max_swap_amount_in, query_native_swap_amount_out, query_native_swap_rate,
    query_pending_owner, query_relayer_fee, query_stats, query_token_decimals,
};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, STATS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let token_bridge = deps.api.addr_validate(&msg.token_bridge)?;

    if msg.chain_id == 0 {
        return Err(ContractError::InvalidChainId {
            chain_id: msg.chain_id,
        });
    }
    if msg.swap_rate_precision.is_zero() {
        return Err(ContractError::InvalidPrecision);
    }
    if msg.native_denom.trim().is_empty() {
        return Err(ContractError::InvalidFunds {
            reason: "native denom must not be empty".to_string(),
        });
    }
    if msg.address_prefix.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "address prefix must not be empty".to_string(),
        });
    }

    let config = Config {
        owner,
        token_bridge,
        chain_id: msg.chain_id,
        native_denom: msg.native_denom,
        native_decimals: msg.native_decimals,
        address_prefix: msg.address_prefix,
        swap_rate_precision: msg.swap_rate_precision,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token_bridge", config.token_bridge)
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute(
            "swap_rate_precision",
            config.swap_rate_precision.to_string(),
        ))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Transfers
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),
        ExecuteMsg::WrapAndTransferWithRelay {
            to_native_token_amount,
            target_chain,
            target_recipient,
            batch_id,
        } => execute_wrap_and_transfer(
            deps,
            info,
            to_native_token_amount,
            target_chain,
            target_recipient,
            batch_id,
        ),
        ExecuteMsg::CompleteTransferWithRelay { vaa } => {
            execute_complete_transfer_with_relay(deps, info, vaa)
        }

        // Registry
        ExecuteMsg::RegisterToken {
            chain_id,
            token,
            decimals,
        } => execute_register_token(deps, info, chain_id, token, decimals),
        ExecuteMsg::DeregisterToken { chain_id, token } => {
            execute_deregister_token(deps, info, chain_id, token)
        }
        ExecuteMsg::RegisterForeignContract { chain_id, address } => {
            execute_register_foreign_contract(deps, info, chain_id, address)
        }
        ExecuteMsg::UpdateRelayerFee {
            chain_id,
            token,
            fee,
        } => execute_update_relayer_fee(deps, info, chain_id, token, fee),
        ExecuteMsg::UpdateNativeSwapRate {
            chain_id,
            token,
            rate,
        } => execute_update_native_swap_rate(deps, info, chain_id, token, rate),
        ExecuteMsg::UpdateMaxNativeSwapAmount {
            chain_id,
            token,
            amount,
        } => execute_update_max_native_swap_amount(deps, info, chain_id, token, amount),
        ExecuteMsg::UpdateSwapRatePrecision { precision } => {
            execute_update_swap_rate_precision(deps, info, precision)
        }

        // Ownership
        ExecuteMsg::SubmitOwnershipTransfer { new_owner } => {
            execute_submit_ownership_transfer(deps, info, new_owner)
        }
        ExecuteMsg::ConfirmOwnershipTransfer {} => execute_confirm_ownership_transfer(deps, info),
        ExecuteMsg::CancelOwnershipTransfer {} => execute_cancel_ownership_transfer(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INITIATE_TRANSFER_REPLY_ID => handle_initiate_transfer_reply(msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::IsAcceptedToken { chain_id, token } => {
            to_json_binary(&query_is_accepted_token(deps, chain_id, token)?)
        }
        QueryMsg::AcceptedTokens {
            chain_id,
            start_after,
            limit,
        } => to_json_binary(&query_accepted_tokens(deps, chain_id, start_after, limit)?),
        QueryMsg::TokenDecimals { token } => to_json_binary(&query_token_decimals(deps, token)?),
        QueryMsg::RelayerFee { chain_id, token } => {
            to_json_binary(&query_relayer_fee(deps, chain_id, token)?)
        }
        QueryMsg::NativeSwapRate { chain_id, token } => {
            to_json_binary(&query_native_swap_rate(deps, chain_id, token)?)
        }
        QueryMsg::MaxNativeSwapAmount { chain_id, token } => {
            to_json_binary(&query_max_native_swap_amount(deps, chain_id, token)?)
        }
        QueryMsg::ForeignContract { chain_id } => {
            to_json_binary(&query_foreign_contract(deps, chain_id)?)
        }
        QueryMsg::ForeignContracts { start_after, limit } => {
            to_json_binary(&query_foreign_contracts(deps, start_after, limit)?)
        }
        QueryMsg::MaxSwapAmountIn { token } => {
            to_json_binary(&query_max_swap_amount_in(deps, token)?)
        }
        QueryMsg::NativeSwapAmountOut {
            token,
            to_native_amount,
        } => to_json_binary(&query_native_swap_amount_out(
            deps,
            token,
            to_native_amount,
        )?),
        QueryMsg::DecodePayload { payload } => to_json_binary(&query_decode_payload(payload)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if STATS.may_load(deps.storage)?.is_none() {
        STATS.save(deps.storage, &Stats::default())?;
    }

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
