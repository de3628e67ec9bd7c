//! Execute handlers for the token bridge relayer contract.
//!
//! - `outgoing` - CW20 and native transfer initiation, bridge reply
//! - `redeem` - redemption of delivered transfers
//! - `config` - token, foreign contract, fee and swap registry management
//! - `admin` - ownership transfer

mod admin;
mod config;
mod outgoing;
mod redeem;

pub use admin::*;
pub use config::*;
pub use outgoing::*;
pub use redeem::*;

use cosmwasm_std::{Binary, QuerierWrapper, StdResult, Storage};
use cw20::{Cw20QueryMsg, TokenInfoResponse};
use relay_common::AssetInfo;

use crate::error::ContractError;
use crate::state::{native_decimals, Config};

/// Decimals of an asset: those recorded at registration for bank denoms
/// (the configured native decimals if none were), the token's own metadata
/// for CW20s.
pub(crate) fn asset_decimals(
    storage: &dyn Storage,
    querier: &QuerierWrapper,
    asset: &AssetInfo,
    config: &Config,
) -> StdResult<u8> {
    match asset {
        AssetInfo::Native { denom } => {
            Ok(native_decimals(storage, denom)?.unwrap_or(config.native_decimals))
        }
        AssetInfo::Cw20 { contract_addr } => {
            let info: TokenInfoResponse =
                querier.query_wasm_smart(contract_addr, &Cw20QueryMsg::TokenInfo {})?;
            Ok(info.decimals)
        }
    }
}

/// Interpret a message field as a 32-byte universal address.
pub(crate) fn parse_universal_address(bytes: &Binary) -> Result<[u8; 32], ContractError> {
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| ContractError::InvalidAddressLength { len: bytes.len() })
}
