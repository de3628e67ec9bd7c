//! Shared setup for the relayer integration tests.
//!
//! Chain 3 is local, chain 2 is the foreign chain whose relayer contract is
//! `FOREIGN_CONTRACT`. The CW20 test token has 18 decimals, the native denom
//! `uluna` has 6.

#![allow(dead_code)]

pub mod mock_token_bridge;

use cosmwasm_std::{coins, to_json_binary, Addr, Binary, Coin, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use relay_common::{AssetInfo, RelayPayload};

use token_bridge_relayer::address_codec;
use token_bridge_relayer::msg::{ExecuteMsg, InstantiateMsg, ReceiveMsg};

use mock_token_bridge::{MockInstantiateMsg, MockQueryMsg, MockVaa, OutboundTransfer};

pub const LOCAL_CHAIN: u16 = 3;
pub const FOREIGN_CHAIN: u16 = 2;
pub const FOREIGN_CONTRACT: [u8; 32] = [0xEE; 32];
pub const NATIVE_DENOM: &str = "uluna";
pub const NATIVE_DECIMALS: u8 = 6;
pub const TOKEN_DECIMALS: u8 = 18;
/// Swap rates are native units per token unit, scaled by 1e18
pub const SWAP_RATE_PRECISION: u128 = 1_000_000_000_000_000_000;
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Valid bech32 accounts, so payload recipients can name them.
pub const OWNER: &str = "terra1fsgzj6t7udv8zhf6zj32mkqhcjcpv52yw55xl5";
pub const USER: &str = "terra1pgm8hyk0pvphmlvfjc8wsvk4daluz5tga80llc";
pub const RELAYER: &str = "terra1ru86kat2qyr6t55h2lhjpxcqdahptkfcz4s7pf";
pub const RECIPIENT: &str = "terra1vewsdxxmeraett7ztsaym88jsrv85kzmpavjjg";

pub struct TestEnv {
    pub app: App,
    pub owner: Addr,
    pub user: Addr,
    pub relayer: Addr,
    pub recipient: Addr,
    pub bridge: Addr,
    pub token: Addr,
    pub contract: Addr,
}

pub fn contract_relayer() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_bridge_relayer::contract::execute,
        token_bridge_relayer::contract::instantiate,
        token_bridge_relayer::contract::query,
    )
    .with_reply(token_bridge_relayer::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub fn instantiate_msg(owner: &Addr, bridge: &Addr) -> InstantiateMsg {
    InstantiateMsg {
        owner: owner.to_string(),
        token_bridge: bridge.to_string(),
        chain_id: LOCAL_CHAIN,
        native_denom: NATIVE_DENOM.to_string(),
        native_decimals: NATIVE_DECIMALS,
        address_prefix: "terra".to_string(),
        swap_rate_precision: Uint128::new(SWAP_RATE_PRECISION),
    }
}

/// Bridge, token and relayer deployed; nothing registered.
pub fn setup() -> TestEnv {
    let mut app = App::default();

    let owner = Addr::unchecked(OWNER);
    let user = Addr::unchecked(USER);
    let relayer = Addr::unchecked(RELAYER);
    let recipient = Addr::unchecked(RECIPIENT);

    app.init_modules(|router, _, storage| {
        for account in [&owner, &user, &relayer] {
            router
                .bank
                .init_balance(storage, account, coins(1_000_000_000_000, NATIVE_DENOM))
                .unwrap();
        }
    });

    let bridge_code = app.store_code(mock_token_bridge::contract());
    let bridge = app
        .instantiate_contract(
            bridge_code,
            owner.clone(),
            &MockInstantiateMsg {},
            &[],
            "token-bridge",
            None,
        )
        .unwrap();

    // the bridge holds custody for inbound releases
    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &bridge, coins(1_000_000_000_000, NATIVE_DENOM))
            .unwrap();
    });

    let cw20_code = app.store_code(contract_cw20());
    let token = app
        .instantiate_contract(
            cw20_code,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Wrapped Ether".to_string(),
                symbol: "WETH".to_string(),
                decimals: TOKEN_DECIMALS,
                initial_balances: vec![
                    Cw20Coin {
                        address: user.to_string(),
                        amount: Uint128::new(1_000 * ONE_TOKEN),
                    },
                    Cw20Coin {
                        address: bridge.to_string(),
                        amount: Uint128::new(1_000 * ONE_TOKEN),
                    },
                ],
                mint: Some(MinterResponse {
                    minter: owner.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            "weth",
            None,
        )
        .unwrap();

    let relayer_code = app.store_code(contract_relayer());
    let contract = app
        .instantiate_contract(
            relayer_code,
            owner.clone(),
            &instantiate_msg(&owner, &bridge),
            &[],
            "token-bridge-relayer",
            Some(owner.to_string()),
        )
        .unwrap();

    TestEnv {
        app,
        owner,
        user,
        relayer,
        recipient,
        bridge,
        token,
        contract,
    }
}

/// `setup()` plus the token and native denom accepted locally and the foreign
/// relayer contract registered.
pub fn setup_registered() -> TestEnv {
    let mut env = setup();
    let token = env.token_info();
    env.admin(ExecuteMsg::RegisterToken {
        chain_id: LOCAL_CHAIN,
        token,
        decimals: None,
    })
    .unwrap();
    env.admin(ExecuteMsg::RegisterToken {
        chain_id: LOCAL_CHAIN,
        token: AssetInfo::native(NATIVE_DENOM),
        decimals: None,
    })
    .unwrap();
    env.admin(ExecuteMsg::RegisterForeignContract {
        chain_id: FOREIGN_CHAIN,
        address: Binary::from(FOREIGN_CONTRACT.to_vec()),
    })
    .unwrap();
    env
}

impl TestEnv {
    pub fn token_info(&self) -> AssetInfo {
        AssetInfo::cw20(self.token.to_string())
    }

    /// Execute as the owner.
    pub fn admin(&mut self, msg: ExecuteMsg) -> anyhow::Result<AppResponse> {
        let owner = self.owner.clone();
        let contract = self.contract.clone();
        self.app.execute_contract(owner, contract, &msg, &[])
    }

    /// CW20 `Send` from the user into the relayer with a transfer hook.
    pub fn send_tokens(
        &mut self,
        amount: u128,
        to_native_token_amount: u128,
        target_chain: u16,
        target_recipient: [u8; 32],
    ) -> anyhow::Result<AppResponse> {
        let hook = ReceiveMsg::TransferTokensWithRelay {
            to_native_token_amount: Uint128::new(to_native_token_amount),
            target_chain,
            target_recipient: Binary::from(target_recipient.to_vec()),
            batch_id: 7,
        };
        let user = self.user.clone();
        let token = self.token.clone();
        self.app.execute_contract(
            user,
            token,
            &Cw20ExecuteMsg::Send {
                contract: self.contract.to_string(),
                amount: Uint128::new(amount),
                msg: to_json_binary(&hook).unwrap(),
            },
            &[],
        )
    }

    pub fn redeem(
        &mut self,
        caller: &Addr,
        vaa: Binary,
        funds: &[Coin],
    ) -> anyhow::Result<AppResponse> {
        let contract = self.contract.clone();
        self.app.execute_contract(
            caller.clone(),
            contract,
            &ExecuteMsg::CompleteTransferWithRelay { vaa },
            funds,
        )
    }

    pub fn token_balance(&self, addr: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn native_balance(&self, addr: &Addr) -> u128 {
        self.app
            .wrap()
            .query_balance(addr, NATIVE_DENOM)
            .unwrap()
            .amount
            .u128()
    }

    pub fn outbound(&self, sequence: u64) -> OutboundTransfer {
        self.app
            .wrap()
            .query_wasm_smart(&self.bridge, &MockQueryMsg::Outbound { sequence })
            .unwrap()
    }

    /// A verified inbound CW20 transfer from the foreign relayer contract.
    pub fn token_vaa(&self, id: u64, normalized_amount: u128, payload: &RelayPayload) -> MockVaa {
        MockVaa {
            valid: true,
            id,
            amount: Uint128::new(normalized_amount),
            local_asset: self.token_info(),
            decimals: TOKEN_DECIMALS,
            emitter_chain: FOREIGN_CHAIN,
            sender: Binary::from(FOREIGN_CONTRACT.to_vec()),
            recipient_chain: LOCAL_CHAIN,
            payload: Binary::from(payload.serialize()),
        }
    }
}

/// Universal form of a local bech32 account.
pub fn universal(addr: &str) -> [u8; 32] {
    address_codec::decode(addr).unwrap().1
}

pub fn payload(fee: u128, to_native: u128, recipient: &str) -> RelayPayload {
    RelayPayload {
        target_relayer_fee: Uint128::new(fee),
        to_native_token_amount: Uint128::new(to_native),
        target_recipient: universal(recipient),
    }
}

/// Value of the first event attribute named `key`.
pub fn attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}
