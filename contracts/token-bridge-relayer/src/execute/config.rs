//! Registry management handlers.
//!
//! This module handles:
//! - Token acceptance (register/deregister)
//! - Foreign contract registration
//! - Relayer fees, native swap rates and caps
//! - Swap rate precision

use cosmwasm_std::{Addr, Binary, DepsMut, MessageInfo, Response, Storage, Uint128};
use relay_common::AssetInfo;

use super::parse_universal_address;
use crate::error::ContractError;
use crate::state::{
    is_accepted_token, native_decimals, remove_accepted_token, set_accepted_token,
    set_foreign_contract, set_max_native_swap_amount, set_native_decimals, set_native_swap_rate,
    set_relayer_fee, Config, CONFIG,
};

/// Load config and check that the sender is the owner.
fn load_owned_config(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

/// Per-token settings only apply to tokens accepted on the local chain.
fn ensure_locally_accepted(
    storage: &dyn Storage,
    config: &Config,
    chain_id: u16,
    token: &AssetInfo,
) -> Result<(), ContractError> {
    if chain_id == 0 {
        return Err(ContractError::InvalidChainId { chain_id });
    }
    if !is_accepted_token(storage, config.chain_id, token.key()) {
        return Err(ContractError::TokenNotRegistered {
            token: token.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Token Acceptance
// ============================================================================

pub fn execute_register_token(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    token: AssetInfo,
    decimals: Option<u8>,
) -> Result<Response, ContractError> {
    let config = load_owned_config(deps.storage, &info.sender)?;

    if chain_id == 0 {
        return Err(ContractError::InvalidChainId { chain_id });
    }
    let token = token.validate(deps.api)?;

    let mut response = Response::new()
        .add_attribute("method", "register_token")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("token", token.key());

    match (&token, decimals) {
        (AssetInfo::Cw20 { contract_addr }, Some(_)) => {
            return Err(ContractError::DecimalsNotConfigurable {
                token: contract_addr.clone(),
            })
        }
        (AssetInfo::Cw20 { .. }, None) => {}
        (AssetInfo::Native { denom }, decimals) => {
            // an explicit value overrides; otherwise keep what is recorded
            let decimals = match decimals {
                Some(decimals) => decimals,
                None => native_decimals(deps.storage, denom)?.unwrap_or(config.native_decimals),
            };
            set_native_decimals(deps.storage, denom, decimals)?;
            response = response.add_attribute("decimals", decimals.to_string());
        }
    }
    set_accepted_token(deps.storage, chain_id, &token)?;

    Ok(response)
}

pub fn execute_deregister_token(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    token: AssetInfo,
) -> Result<Response, ContractError> {
    load_owned_config(deps.storage, &info.sender)?;

    if !is_accepted_token(deps.storage, chain_id, token.key()) {
        return Err(ContractError::TokenNotRegistered {
            token: token.to_string(),
        });
    }
    remove_accepted_token(deps.storage, chain_id, token.key());

    Ok(Response::new()
        .add_attribute("method", "deregister_token")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("token", token.key()))
}

// ============================================================================
// Foreign Contracts
// ============================================================================

pub fn execute_register_foreign_contract(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    address: Binary,
) -> Result<Response, ContractError> {
    let config = load_owned_config(deps.storage, &info.sender)?;

    if chain_id == 0 || chain_id == config.chain_id {
        return Err(ContractError::InvalidChainId { chain_id });
    }
    let address = parse_universal_address(&address)?;
    if address == [0u8; 32] {
        return Err(ContractError::InvalidForeignContract);
    }
    set_foreign_contract(deps.storage, chain_id, &address)?;

    Ok(Response::new()
        .add_attribute("method", "register_foreign_contract")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("address", format!("0x{}", hex::encode(address))))
}

// ============================================================================
// Fees & Swaps
// ============================================================================

/// Set the relayer fee (token local decimals) for transfers of `token`
/// to or from `chain_id`.
pub fn execute_update_relayer_fee(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    token: AssetInfo,
    fee: Uint128,
) -> Result<Response, ContractError> {
    let config = load_owned_config(deps.storage, &info.sender)?;
    ensure_locally_accepted(deps.storage, &config, chain_id, &token)?;

    set_relayer_fee(deps.storage, chain_id, token.key(), fee)?;

    Ok(Response::new()
        .add_attribute("method", "update_relayer_fee")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("token", token.key())
        .add_attribute("fee", fee.to_string()))
}

pub fn execute_update_native_swap_rate(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    token: AssetInfo,
    rate: Uint128,
) -> Result<Response, ContractError> {
    let config = load_owned_config(deps.storage, &info.sender)?;
    ensure_locally_accepted(deps.storage, &config, chain_id, &token)?;
    if rate.is_zero() {
        return Err(ContractError::InvalidSwapRate);
    }

    set_native_swap_rate(deps.storage, chain_id, token.key(), rate)?;

    Ok(Response::new()
        .add_attribute("method", "update_native_swap_rate")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("token", token.key())
        .add_attribute("rate", rate.to_string()))
}

pub fn execute_update_max_native_swap_amount(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    token: AssetInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = load_owned_config(deps.storage, &info.sender)?;
    ensure_locally_accepted(deps.storage, &config, chain_id, &token)?;

    set_max_native_swap_amount(deps.storage, chain_id, token.key(), amount)?;

    Ok(Response::new()
        .add_attribute("method", "update_max_native_swap_amount")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("token", token.key())
        .add_attribute("max_native_swap_amount", amount.to_string()))
}

pub fn execute_update_swap_rate_precision(
    deps: DepsMut,
    info: MessageInfo,
    precision: Uint128,
) -> Result<Response, ContractError> {
    let mut config = load_owned_config(deps.storage, &info.sender)?;
    if precision.is_zero() {
        return Err(ContractError::InvalidPrecision);
    }

    config.swap_rate_precision = precision;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_swap_rate_precision")
        .add_attribute("swap_rate_precision", precision.to_string()))
}
