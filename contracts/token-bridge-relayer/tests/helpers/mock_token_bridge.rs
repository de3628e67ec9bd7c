//! In-test stand-in for the token bridge.
//!
//! Delivered messages are JSON-encoded `MockVaa`s. A VAA with `valid: false`
//! plays the part of a forged message and fails verification.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Item, Map};
use relay_common::token_bridge::{TokenBridgeExecuteMsg, TransferInfoResponse};
use relay_common::{denormalize, Asset, AssetInfo};

#[cw_serde]
pub struct MockVaa {
    pub valid: bool,
    /// Distinguishes otherwise identical messages
    pub id: u64,
    /// Normalized amount
    pub amount: Uint128,
    pub local_asset: AssetInfo,
    /// Decimals used to release `amount`
    pub decimals: u8,
    pub emitter_chain: u16,
    pub sender: Binary,
    pub recipient_chain: u16,
    pub payload: Binary,
}

impl MockVaa {
    pub fn encode(&self) -> Binary {
        to_json_binary(self).unwrap()
    }
}

/// An outbound transfer as the bridge received it
#[cw_serde]
pub struct OutboundTransfer {
    pub sender: String,
    pub asset: Asset,
    pub recipient_chain: u16,
    pub recipient: Binary,
    pub payload: Binary,
    pub nonce: u32,
}

#[cw_serde]
pub struct MockInstantiateMsg {}

#[cw_serde]
pub enum MockQueryMsg {
    TransferInfo { vaa: Binary },
    Outbound { sequence: u64 },
}

const NEXT_SEQUENCE: Item<u64> = Item::new("next_sequence");
const OUTBOUND: Map<u64, OutboundTransfer> = Map::new("outbound");
const COMPLETED: Map<&[u8], bool> = Map::new("completed");

fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: MockInstantiateMsg,
) -> StdResult<Response> {
    NEXT_SEQUENCE.save(deps.storage, &0)?;
    Ok(Response::new())
}

fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: TokenBridgeExecuteMsg,
) -> StdResult<Response> {
    match msg {
        TokenBridgeExecuteMsg::InitiateTransferWithPayload {
            asset,
            recipient_chain,
            recipient,
            fee: _,
            payload,
            nonce,
        } => {
            let mut messages = vec![];
            match &asset.info {
                AssetInfo::Cw20 { contract_addr } => messages.push(WasmMsg::Execute {
                    contract_addr: contract_addr.clone(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: info.sender.to_string(),
                        recipient: env.contract.address.to_string(),
                        amount: asset.amount,
                    })?,
                    funds: vec![],
                }),
                AssetInfo::Native { denom } => {
                    let sent = info
                        .funds
                        .iter()
                        .find(|c| &c.denom == denom)
                        .map(|c| c.amount)
                        .unwrap_or_default();
                    if sent != asset.amount {
                        return Err(StdError::generic_err("native funds mismatch"));
                    }
                }
            }

            let sequence = NEXT_SEQUENCE.load(deps.storage)?;
            NEXT_SEQUENCE.save(deps.storage, &(sequence + 1))?;
            OUTBOUND.save(
                deps.storage,
                sequence,
                &OutboundTransfer {
                    sender: info.sender.to_string(),
                    asset,
                    recipient_chain,
                    recipient,
                    payload,
                    nonce,
                },
            )?;

            Ok(Response::new()
                .add_messages(messages)
                .add_attribute("action", "initiate_transfer_with_payload")
                .add_attribute("sequence", sequence.to_string()))
        }
        TokenBridgeExecuteMsg::CompleteTransferWithPayload { data, relayer } => {
            let vaa = parse(&data)?;
            if COMPLETED.has(deps.storage, data.as_slice()) {
                return Err(StdError::generic_err("transfer already completed"));
            }
            COMPLETED.save(deps.storage, data.as_slice(), &true)?;

            let amount = denormalize(vaa.amount, vaa.decimals)?;
            let release = Asset::new(vaa.local_asset, amount).transfer_msg(&info.sender)?;

            Ok(Response::new()
                .add_message(release)
                .add_attribute("action", "complete_transfer_with_payload")
                .add_attribute("relayer", relayer))
        }
    }
}

fn query(deps: Deps, _env: Env, msg: MockQueryMsg) -> StdResult<Binary> {
    match msg {
        MockQueryMsg::TransferInfo { vaa } => {
            let vaa = parse(&vaa)?;
            to_json_binary(&TransferInfoResponse {
                amount: vaa.amount,
                token_address: Binary::from(vec![0u8; 32]),
                token_chain: vaa.emitter_chain,
                local_asset: vaa.local_asset,
                emitter_chain: vaa.emitter_chain,
                sender: vaa.sender,
                recipient: Binary::from(vec![0u8; 32]),
                recipient_chain: vaa.recipient_chain,
                payload: vaa.payload,
            })
        }
        MockQueryMsg::Outbound { sequence } => {
            to_json_binary(&OUTBOUND.load(deps.storage, sequence)?)
        }
    }
}

fn parse(data: &Binary) -> StdResult<MockVaa> {
    let vaa: MockVaa = from_json(data)?;
    if !vaa.valid {
        return Err(StdError::generic_err("invalid guardian signature"));
    }
    Ok(vaa)
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
