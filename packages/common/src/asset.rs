//! Asset descriptors shared by the relayer and the token bridge interface.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Api, BankMsg, Coin, CosmosMsg, StdError, StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

/// A token known to the local chain: either a bank denom or a CW20 contract.
#[cw_serde]
#[derive(Eq)]
pub enum AssetInfo {
    /// Bank module denom (e.g. `uluna`)
    Native { denom: String },
    /// CW20 token contract
    Cw20 { contract_addr: String },
}

impl AssetInfo {
    pub fn native(denom: impl Into<String>) -> Self {
        AssetInfo::Native {
            denom: denom.into(),
        }
    }

    pub fn cw20(contract_addr: impl Into<String>) -> Self {
        AssetInfo::Cw20 {
            contract_addr: contract_addr.into(),
        }
    }

    /// Storage key of the asset: the denom or the contract address.
    pub fn key(&self) -> &str {
        match self {
            AssetInfo::Native { denom } => denom,
            AssetInfo::Cw20 { contract_addr } => contract_addr,
        }
    }

    /// Check that the descriptor names something that can exist on chain.
    ///
    /// CW20 addresses are validated (and normalized) through the chain API.
    pub fn validate(self, api: &dyn Api) -> StdResult<Self> {
        match self {
            AssetInfo::Native { denom } => {
                if denom.trim().is_empty() {
                    return Err(StdError::generic_err("native denom must not be empty"));
                }
                Ok(AssetInfo::Native { denom })
            }
            AssetInfo::Cw20 { contract_addr } => {
                let addr = api.addr_validate(&contract_addr)?;
                Ok(AssetInfo::Cw20 {
                    contract_addr: addr.into_string(),
                })
            }
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An amount of a specific asset.
#[cw_serde]
pub struct Asset {
    pub info: AssetInfo,
    pub amount: Uint128,
}

impl Asset {
    pub fn new(info: AssetInfo, amount: impl Into<Uint128>) -> Self {
        Self {
            info,
            amount: amount.into(),
        }
    }

    /// Build the message that moves this asset from the executing contract
    /// to `recipient`.
    pub fn transfer_msg(&self, recipient: impl Into<String>) -> StdResult<CosmosMsg> {
        let recipient = recipient.into();
        match &self.info {
            AssetInfo::Native { denom } => Ok(CosmosMsg::Bank(BankMsg::Send {
                to_address: recipient,
                amount: vec![Coin {
                    denom: denom.clone(),
                    amount: self.amount,
                }],
            })),
            AssetInfo::Cw20 { contract_addr } => Ok(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: contract_addr.clone(),
                msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                    recipient,
                    amount: self.amount,
                })?,
                funds: vec![],
            })),
        }
    }
}
