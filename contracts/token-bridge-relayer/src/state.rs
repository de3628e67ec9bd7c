//! State definitions for the token bridge relayer contract
//!
//! The registry is a set of composite-keyed maps, one per field, each with an
//! explicit getter/setter pair. Getters return the stored value or the
//! field's default (not accepted, zero, unset).

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};
use relay_common::AssetInfo;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Owner address for registry management
    pub owner: Addr,
    /// Token bridge contract that custodies tokens and verifies messages
    pub token_bridge: Addr,
    /// Chain id of the local chain in the bridge's numbering
    pub chain_id: u16,
    /// Native gas denom paid out by native swaps
    pub native_denom: String,
    /// Decimals of the native denom; default for registered bank denoms
    pub native_decimals: u8,
    /// Bech32 prefix of local account addresses
    pub address_prefix: String,
    /// Scale factor of native swap rates
    pub swap_rate_precision: Uint128,
}

/// Relay activity counters
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Outbound transfers handed to the token bridge
    pub transfers_initiated: u64,
    /// Inbound transfers redeemed through this contract
    pub redemptions_completed: u64,
    /// Redemptions submitted by the recipient itself
    pub self_redemptions: u64,
    /// Redemptions that paid out native gas
    pub native_swaps: u64,
}

// ============================================================================
// Storage Keys
// ============================================================================

pub const CONTRACT_NAME: &str = "crates.io:token-bridge-relayer";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");
pub const STATS: Item<Stats> = Item::new("stats");

/// (chain_id, token key) -> asset, present only while accepted
pub const ACCEPTED_TOKENS: Map<(u16, &str), AssetInfo> = Map::new("accepted_tokens");
/// (chain_id, token key) -> relayer fee in the token's local decimals
pub const RELAYER_FEES: Map<(u16, &str), Uint128> = Map::new("relayer_fees");
/// (chain_id, token key) -> native units per token unit, scaled by precision
pub const NATIVE_SWAP_RATES: Map<(u16, &str), Uint128> = Map::new("native_swap_rates");
/// (chain_id, token key) -> cap on native units paid out per redemption
pub const MAX_NATIVE_SWAP_AMOUNTS: Map<(u16, &str), Uint128> =
    Map::new("max_native_swap_amounts");
/// bank denom -> decimals, recorded when the denom is registered
pub const NATIVE_DECIMALS: Map<&str, u8> = Map::new("native_decimals");
/// chain_id -> 32-byte address of the relayer contract on that chain
pub const FOREIGN_CONTRACTS: Map<u16, [u8; 32]> = Map::new("foreign_contracts");

// ============================================================================
// Registry Accessors
// ============================================================================

pub fn is_accepted_token(storage: &dyn Storage, chain_id: u16, token: &str) -> bool {
    ACCEPTED_TOKENS.has(storage, (chain_id, token))
}

pub fn set_accepted_token(
    storage: &mut dyn Storage,
    chain_id: u16,
    asset: &AssetInfo,
) -> StdResult<()> {
    ACCEPTED_TOKENS.save(storage, (chain_id, asset.key()), asset)
}

pub fn remove_accepted_token(storage: &mut dyn Storage, chain_id: u16, token: &str) {
    ACCEPTED_TOKENS.remove(storage, (chain_id, token));
}

pub fn native_decimals(storage: &dyn Storage, denom: &str) -> StdResult<Option<u8>> {
    NATIVE_DECIMALS.may_load(storage, denom)
}

pub fn set_native_decimals(storage: &mut dyn Storage, denom: &str, decimals: u8) -> StdResult<()> {
    NATIVE_DECIMALS.save(storage, denom, &decimals)
}

pub fn relayer_fee(storage: &dyn Storage, chain_id: u16, token: &str) -> StdResult<Uint128> {
    Ok(RELAYER_FEES
        .may_load(storage, (chain_id, token))?
        .unwrap_or_default())
}

pub fn set_relayer_fee(
    storage: &mut dyn Storage,
    chain_id: u16,
    token: &str,
    fee: Uint128,
) -> StdResult<()> {
    RELAYER_FEES.save(storage, (chain_id, token), &fee)
}

pub fn native_swap_rate(storage: &dyn Storage, chain_id: u16, token: &str) -> StdResult<Uint128> {
    Ok(NATIVE_SWAP_RATES
        .may_load(storage, (chain_id, token))?
        .unwrap_or_default())
}

pub fn set_native_swap_rate(
    storage: &mut dyn Storage,
    chain_id: u16,
    token: &str,
    rate: Uint128,
) -> StdResult<()> {
    NATIVE_SWAP_RATES.save(storage, (chain_id, token), &rate)
}

pub fn max_native_swap_amount(
    storage: &dyn Storage,
    chain_id: u16,
    token: &str,
) -> StdResult<Uint128> {
    Ok(MAX_NATIVE_SWAP_AMOUNTS
        .may_load(storage, (chain_id, token))?
        .unwrap_or_default())
}

pub fn set_max_native_swap_amount(
    storage: &mut dyn Storage,
    chain_id: u16,
    token: &str,
    amount: Uint128,
) -> StdResult<()> {
    MAX_NATIVE_SWAP_AMOUNTS.save(storage, (chain_id, token), &amount)
}

pub fn foreign_contract(storage: &dyn Storage, chain_id: u16) -> StdResult<Option<[u8; 32]>> {
    FOREIGN_CONTRACTS.may_load(storage, chain_id)
}

pub fn set_foreign_contract(
    storage: &mut dyn Storage,
    chain_id: u16,
    address: &[u8; 32],
) -> StdResult<()> {
    FOREIGN_CONTRACTS.save(storage, chain_id, address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    #[test]
    fn test_registry_defaults() {
        let deps = mock_dependencies();

        assert!(!is_accepted_token(&deps.storage, 3, "uluna"));
        assert_eq!(relayer_fee(&deps.storage, 3, "uluna").unwrap(), Uint128::zero());
        assert_eq!(native_swap_rate(&deps.storage, 3, "uluna").unwrap(), Uint128::zero());
        assert_eq!(
            max_native_swap_amount(&deps.storage, 3, "uluna").unwrap(),
            Uint128::zero()
        );
        assert_eq!(foreign_contract(&deps.storage, 2).unwrap(), None);
        assert_eq!(native_decimals(&deps.storage, "uluna").unwrap(), None);
    }

    #[test]
    fn test_native_decimals_per_denom() {
        let mut deps = mock_dependencies();

        set_native_decimals(&mut deps.storage, "uluna", 6).unwrap();
        set_native_decimals(&mut deps.storage, "afet", 18).unwrap();

        assert_eq!(native_decimals(&deps.storage, "uluna").unwrap(), Some(6));
        assert_eq!(native_decimals(&deps.storage, "afet").unwrap(), Some(18));
    }

    #[test]
    fn test_registry_last_write_wins() {
        let mut deps = mock_dependencies();

        set_relayer_fee(&mut deps.storage, 3, "uluna", Uint128::new(100)).unwrap();
        set_relayer_fee(&mut deps.storage, 3, "uluna", Uint128::new(250)).unwrap();
        assert_eq!(relayer_fee(&deps.storage, 3, "uluna").unwrap(), Uint128::new(250));

        set_native_swap_rate(&mut deps.storage, 3, "uluna", Uint128::new(7)).unwrap();
        assert_eq!(native_swap_rate(&deps.storage, 3, "uluna").unwrap(), Uint128::new(7));

        set_max_native_swap_amount(&mut deps.storage, 3, "uluna", Uint128::new(9)).unwrap();
        assert_eq!(
            max_native_swap_amount(&deps.storage, 3, "uluna").unwrap(),
            Uint128::new(9)
        );

        set_foreign_contract(&mut deps.storage, 2, &[1u8; 32]).unwrap();
        set_foreign_contract(&mut deps.storage, 2, &[2u8; 32]).unwrap();
        assert_eq!(foreign_contract(&deps.storage, 2).unwrap(), Some([2u8; 32]));
    }

    #[test]
    fn test_registry_keys_are_per_chain_and_token() {
        let mut deps = mock_dependencies();

        set_relayer_fee(&mut deps.storage, 3, "uluna", Uint128::new(100)).unwrap();

        assert_eq!(relayer_fee(&deps.storage, 4, "uluna").unwrap(), Uint128::zero());
        assert_eq!(relayer_fee(&deps.storage, 3, "uusd").unwrap(), Uint128::zero());
    }

    #[test]
    fn test_accept_and_remove_token() {
        let mut deps = mock_dependencies();
        let asset = AssetInfo::cw20("terra1token");

        set_accepted_token(&mut deps.storage, 3, &asset).unwrap();
        assert!(is_accepted_token(&deps.storage, 3, "terra1token"));
        assert!(!is_accepted_token(&deps.storage, 2, "terra1token"));

        remove_accepted_token(&mut deps.storage, 3, "terra1token");
        assert!(!is_accepted_token(&deps.storage, 3, "terra1token"));
    }
}
