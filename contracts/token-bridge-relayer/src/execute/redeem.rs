//! Redemption of delivered transfers.
//!
//! The handler walks the redemption stages in order, gathering registry
//! values for the payout planner. Nothing is written and no message is built
//! until the plan is complete.

use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, DepsMut, MessageInfo, Response,
    StdError, Uint128, WasmMsg,
};
use relay_common::token_bridge::{TokenBridgeExecuteMsg, TokenBridgeQueryMsg, TransferInfoResponse};
use relay_common::{Asset, RelayPayload};

use super::asset_decimals;
use crate::address_codec;
use crate::error::ContractError;
use crate::relay::{plan_redemption, RedemptionInput, RedemptionStage};
use crate::state::{
    foreign_contract, is_accepted_token, max_native_swap_amount, native_swap_rate, relayer_fee,
    CONFIG, STATS,
};

/// Redeem a delivered transfer and split it between recipient and caller.
pub fn execute_complete_transfer_with_relay(
    deps: DepsMut,
    info: MessageInfo,
    vaa: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let attached_native = attached_native(&info, &config.native_denom)?;
    let mut stage = RedemptionStage::MessageReceived;

    let transfer: TransferInfoResponse = deps
        .querier
        .query_wasm_smart(
            &config.token_bridge,
            &TokenBridgeQueryMsg::TransferInfo { vaa: vaa.clone() },
        )
        .map_err(|e| ContractError::MessageVerificationFailed {
            reason: e.to_string(),
        })?;
    if transfer.recipient_chain != config.chain_id {
        return Err(ContractError::MessageVerificationFailed {
            reason: format!(
                "transfer is for chain {}, not {}",
                transfer.recipient_chain, config.chain_id
            ),
        });
    }
    stage = stage.next();

    let asset = transfer.local_asset;
    let token = asset.key();
    if !is_accepted_token(deps.storage, config.chain_id, token) {
        return Err(ContractError::TokenNotRegistered {
            token: token.to_string(),
        });
    }
    stage = stage.next();

    let emitter = foreign_contract(deps.storage, transfer.emitter_chain)?;
    if emitter.as_ref().map(|a| a.as_slice()) != Some(transfer.sender.as_slice()) {
        return Err(ContractError::ContractNotRegistered {
            chain_id: transfer.emitter_chain,
        });
    }
    stage = stage.next();

    let payload = RelayPayload::deserialize(transfer.payload.as_slice())?;
    stage = stage.next();

    let recipient = address_codec::encode(&payload.target_recipient, &config.address_prefix)
        .and_then(|addr| deps.api.addr_validate(&addr))
        .map_err(|e| ContractError::InvalidAddress {
            reason: e.to_string(),
        })?;
    let input = RedemptionInput {
        amount: transfer.amount,
        decimals: asset_decimals(deps.storage, &deps.querier, &asset, &config)?,
        payload,
        caller: info.sender.clone(),
        recipient,
        attached_native,
        local_relayer_fee: relayer_fee(deps.storage, config.chain_id, token)?,
        swap_rate: native_swap_rate(deps.storage, config.chain_id, token)?,
        max_native_swap_amount: max_native_swap_amount(deps.storage, config.chain_id, token)?,
        swap_rate_precision: config.swap_rate_precision,
    };
    let plan = plan_redemption(&input)?;
    stage = stage.next();

    STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
        stats.redemptions_completed += 1;
        if plan.self_redemption {
            stats.self_redemptions += 1;
        }
        if !plan.native_quote.is_zero() {
            stats.native_swaps += 1;
        }
        Ok(stats)
    })?;

    // Settlement: bridge release first, then token payouts, then native.
    let mut messages: Vec<CosmosMsg> = vec![WasmMsg::Execute {
        contract_addr: config.token_bridge.to_string(),
        msg: to_json_binary(&TokenBridgeExecuteMsg::CompleteTransferWithPayload {
            data: vaa,
            relayer: info.sender.to_string(),
        })?,
        funds: vec![],
    }
    .into()];
    if !plan.recipient_amount.is_zero() {
        let payout = Asset::new(asset.clone(), plan.recipient_amount);
        messages.push(payout.transfer_msg(&plan.recipient)?);
    }
    if !plan.relayer_amount.is_zero() {
        let payout = Asset::new(asset.clone(), plan.relayer_amount);
        messages.push(payout.transfer_msg(&plan.relayer)?);
    }
    if !plan.native_quote.is_zero() {
        messages.push(native_send(&plan.recipient, &config.native_denom, plan.native_quote));
    }
    if !plan.native_refund.is_zero() {
        messages.push(native_send(&plan.relayer, &config.native_denom, plan.native_refund));
    }
    stage = stage.next();

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "complete_transfer_with_relay")
        .add_attribute("stage", stage.as_str())
        .add_attribute("token", token)
        .add_attribute("amount", plan.total_amount.to_string())
        .add_attribute("recipient", plan.recipient.as_str())
        .add_attribute("relayer", plan.relayer.as_str())
        .add_attribute("self_redemption", plan.self_redemption.to_string())
        .add_attribute("relayer_fee", plan.relayer_fee.to_string())
        .add_attribute("to_native_amount", plan.to_native_amount.to_string())
        .add_attribute("native_quote", plan.native_quote.to_string())
        .add_attribute("refund", plan.native_refund.to_string()))
}

/// Total native gas attached. Any other denom is rejected.
fn attached_native(info: &MessageInfo, native_denom: &str) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != native_denom {
            return Err(ContractError::InvalidFunds {
                reason: format!("unexpected denom {}", coin.denom),
            });
        }
        total = total.checked_add(coin.amount)?;
    }
    Ok(total)
}

fn native_send(to: &Addr, denom: &str, amount: Uint128) -> CosmosMsg {
    BankMsg::Send {
        to_address: to.to_string(),
        amount: vec![Coin {
            denom: denom.to_string(),
            amount,
        }],
    }
    .into()
}
