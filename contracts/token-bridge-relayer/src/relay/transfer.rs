//! Outbound transfer planning.

use cosmwasm_std::Uint128;
use relay_common::{normalize, truncate_dust, AssetInfo, RelayPayload};

use crate::error::ContractError;

/// What the sender asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub asset: AssetInfo,
    /// Amount in the token's local decimals
    pub amount: Uint128,
    /// Amount to swap into native gas on arrival, local decimals
    pub to_native_token_amount: Uint128,
    pub target_chain: u16,
    pub target_recipient: [u8; 32],
    pub batch_id: u32,
}

/// Registry state relevant to a transfer, read at initiation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferContext {
    /// Whether the asset is registered for the local chain
    pub accepted: bool,
    pub decimals: u8,
    /// `RELAYER_FEES[target_chain, token]`
    pub relayer_fee: Uint128,
    /// Relayer contract on the target chain, if registered
    pub foreign_contract: Option<[u8; 32]>,
}

/// A validated transfer, ready to hand to the token bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    /// Amount locked in the bridge: the request with dust removed
    pub bridged_amount: Uint128,
    /// Sub-precision remainder returned to the sender
    pub dust: Uint128,
    /// Bridge-level recipient: the relayer contract on the target chain
    pub target_contract: [u8; 32],
    pub payload: RelayPayload,
}

/// Validate an outbound transfer and compute what gets locked and encoded.
pub fn plan_transfer(
    request: &TransferRequest,
    context: &TransferContext,
) -> Result<TransferPlan, ContractError> {
    if !context.accepted {
        return Err(ContractError::TokenNotAccepted {
            token: request.asset.to_string(),
        });
    }

    if request.target_recipient == [0u8; 32] {
        return Err(ContractError::ZeroRecipient);
    }

    let target_contract = context
        .foreign_contract
        .ok_or(ContractError::TargetNotRegistered {
            chain_id: request.target_chain,
        })?;

    let normalized_amount = normalize(request.amount, context.decimals);
    if normalized_amount.is_zero() {
        return Err(ContractError::AmountTooSmall);
    }

    let normalized_fee = normalize(context.relayer_fee, context.decimals);
    let normalized_to_native = normalize(request.to_native_token_amount, context.decimals);
    // a sum past u128 can never be covered
    match normalized_to_native.checked_add(normalized_fee) {
        Ok(required) if normalized_amount > required => {}
        _ => return Err(ContractError::InsufficientAmount),
    }

    let (bridged_amount, dust) = truncate_dust(request.amount, context.decimals);

    Ok(TransferPlan {
        bridged_amount,
        dust,
        target_contract,
        payload: RelayPayload {
            target_relayer_fee: normalized_fee,
            to_native_token_amount: normalized_to_native,
            target_recipient: request.target_recipient,
        },
    })
}
