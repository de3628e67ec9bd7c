//! Outgoing transfer handlers.
//!
//! Both entry points funnel into `initiate_transfer`, which plans the
//! transfer, refunds sub-precision dust, and hands the rest to the token
//! bridge. The bridge's sequence comes back through `reply`.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Coin, CosmosMsg, DepsMut, MessageInfo, Reply,
    Response, StdError, SubMsg, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};
use relay_common::token_bridge::{TokenBridgeExecuteMsg, SEQUENCE_ATTRIBUTE};
use relay_common::{Asset, AssetInfo};

use super::{asset_decimals, parse_universal_address};
use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::relay::{plan_transfer, TransferContext, TransferRequest};
use crate::state::{foreign_contract, is_accepted_token, relayer_fee, CONFIG, STATS};

/// Reply id of the bridge's `InitiateTransferWithPayload` sub-message
pub const INITIATE_TRANSFER_REPLY_ID: u64 = 1;

/// Handle a CW20 `Send` into this contract.
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let asset = AssetInfo::cw20(info.sender.to_string());

    match from_json::<ReceiveMsg>(&cw20_msg.msg)? {
        ReceiveMsg::TransferTokensWithRelay {
            to_native_token_amount,
            target_chain,
            target_recipient,
            batch_id,
        } => {
            let request = TransferRequest {
                asset,
                amount: cw20_msg.amount,
                to_native_token_amount,
                target_chain,
                target_recipient: parse_universal_address(&target_recipient)?,
                batch_id,
            };
            initiate_transfer(deps, sender, request)
        }
    }
}

/// Handle a transfer of an attached native coin.
pub fn execute_wrap_and_transfer(
    deps: DepsMut,
    info: MessageInfo,
    to_native_token_amount: Uint128,
    target_chain: u16,
    target_recipient: Binary,
    batch_id: u32,
) -> Result<Response, ContractError> {
    let coin = match info.funds.as_slice() {
        [coin] => coin.clone(),
        [] => {
            return Err(ContractError::InvalidFunds {
                reason: "no coins attached".to_string(),
            })
        }
        _ => {
            return Err(ContractError::InvalidFunds {
                reason: "only one coin allowed per transfer".to_string(),
            })
        }
    };

    let request = TransferRequest {
        asset: AssetInfo::native(coin.denom),
        amount: coin.amount,
        to_native_token_amount,
        target_chain,
        target_recipient: parse_universal_address(&target_recipient)?,
        batch_id,
    };
    initiate_transfer(deps, info.sender, request)
}

fn initiate_transfer(
    deps: DepsMut,
    sender: Addr,
    request: TransferRequest,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token = request.asset.key();

    let accepted = is_accepted_token(deps.storage, config.chain_id, token);
    // unregistered CW20s are never queried
    let decimals = if accepted {
        asset_decimals(deps.storage, &deps.querier, &request.asset, &config)?
    } else {
        0
    };
    let context = TransferContext {
        accepted,
        decimals,
        relayer_fee: relayer_fee(deps.storage, request.target_chain, token)?,
        foreign_contract: foreign_contract(deps.storage, request.target_chain)?,
    };

    let plan = plan_transfer(&request, &context)?;

    STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
        stats.transfers_initiated += 1;
        Ok(stats)
    })?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if !plan.dust.is_zero() {
        messages.push(Asset::new(request.asset.clone(), plan.dust).transfer_msg(&sender)?);
    }

    let funds = match &request.asset {
        AssetInfo::Cw20 { contract_addr } => {
            messages.push(
                WasmMsg::Execute {
                    contract_addr: contract_addr.clone(),
                    msg: to_json_binary(&Cw20ExecuteMsg::IncreaseAllowance {
                        spender: config.token_bridge.to_string(),
                        amount: plan.bridged_amount,
                        expires: None,
                    })?,
                    funds: vec![],
                }
                .into(),
            );
            vec![]
        }
        AssetInfo::Native { denom } => vec![Coin {
            denom: denom.clone(),
            amount: plan.bridged_amount,
        }],
    };

    let initiate = WasmMsg::Execute {
        contract_addr: config.token_bridge.to_string(),
        msg: to_json_binary(&TokenBridgeExecuteMsg::InitiateTransferWithPayload {
            asset: Asset::new(request.asset.clone(), plan.bridged_amount),
            recipient_chain: request.target_chain,
            recipient: Binary::from(plan.target_contract.to_vec()),
            fee: Uint128::zero(),
            payload: Binary::from(plan.payload.serialize()),
            nonce: request.batch_id,
        })?,
        funds,
    };

    Ok(Response::new()
        .add_messages(messages)
        .add_submessage(SubMsg::reply_on_success(
            initiate,
            INITIATE_TRANSFER_REPLY_ID,
        ))
        .add_attribute("method", "transfer_tokens_with_relay")
        .add_attribute("sender", sender)
        .add_attribute("token", token)
        .add_attribute("amount", plan.bridged_amount.to_string())
        .add_attribute("dust_refund", plan.dust.to_string())
        .add_attribute("target_chain", request.target_chain.to_string())
        .add_attribute(
            "target_recipient",
            format!("0x{}", hex::encode(request.target_recipient)),
        )
        .add_attribute("relayer_fee", plan.payload.target_relayer_fee.to_string())
        .add_attribute(
            "to_native_amount",
            plan.payload.to_native_token_amount.to_string(),
        )
        .add_attribute("batch_id", request.batch_id.to_string()))
}

/// Surface the sequence the bridge assigned to the outbound message.
pub fn handle_initiate_transfer_reply(msg: Reply) -> Result<Response, ContractError> {
    let response = msg.result.into_result().map_err(StdError::generic_err)?;

    let sequence = response
        .events
        .iter()
        .filter(|event| event.ty == "wasm")
        .flat_map(|event| &event.attributes)
        .find(|attr| attr.key == SEQUENCE_ATTRIBUTE)
        .ok_or(ContractError::MissingSequence)?
        .value
        .parse::<u64>()
        .map_err(|_| ContractError::MissingSequence)?;

    Ok(Response::new()
        .set_data(to_json_binary(&sequence)?)
        .add_attribute("method", "transfer_tokens_with_relay_reply")
        .add_attribute("sequence", sequence.to_string()))
}
