//! Inbound transfer payout planning.
//!
//! A redemption moves through a fixed sequence of stages. Every check runs
//! before any message is emitted, so a failure at any stage leaves no trace.
//!
//! ```text
//! MessageReceived -> Verified -> TokenResolved -> ContractAuthorized
//!     -> PayloadDecoded -> PayoutComputed -> Settled
//! ```

use std::cmp::min;
use std::fmt;

use cosmwasm_std::{Addr, Uint128, Uint256};
use relay_common::{denormalize, RelayPayload};

use crate::error::ContractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionStage {
    MessageReceived,
    /// Bridge accepted the message as authentic
    Verified,
    /// Local asset is registered
    TokenResolved,
    /// Emitter matches the registered foreign contract
    ContractAuthorized,
    PayloadDecoded,
    PayoutComputed,
    Settled,
}

impl RedemptionStage {
    pub fn next(self) -> Self {
        match self {
            RedemptionStage::MessageReceived => RedemptionStage::Verified,
            RedemptionStage::Verified => RedemptionStage::TokenResolved,
            RedemptionStage::TokenResolved => RedemptionStage::ContractAuthorized,
            RedemptionStage::ContractAuthorized => RedemptionStage::PayloadDecoded,
            RedemptionStage::PayloadDecoded => RedemptionStage::PayoutComputed,
            RedemptionStage::PayoutComputed | RedemptionStage::Settled => RedemptionStage::Settled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RedemptionStage::MessageReceived => "message_received",
            RedemptionStage::Verified => "verified",
            RedemptionStage::TokenResolved => "token_resolved",
            RedemptionStage::ContractAuthorized => "contract_authorized",
            RedemptionStage::PayloadDecoded => "payload_decoded",
            RedemptionStage::PayoutComputed => "payout_computed",
            RedemptionStage::Settled => "settled",
        }
    }
}

impl fmt::Display for RedemptionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the payout depends on, including who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionInput {
    /// Transferred amount as reported by the bridge (8 decimals)
    pub amount: Uint128,
    pub decimals: u8,
    pub payload: RelayPayload,
    pub caller: Addr,
    /// Local account decoded from `payload.target_recipient`
    pub recipient: Addr,
    /// Native gas attached by the caller
    pub attached_native: Uint128,
    /// `RELAYER_FEES[local, token]` at redemption time
    pub local_relayer_fee: Uint128,
    pub swap_rate: Uint128,
    pub max_native_swap_amount: Uint128,
    pub swap_rate_precision: Uint128,
}

/// Validated payout of a redemption. Token amounts are in local decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionPlan {
    pub recipient: Addr,
    pub relayer: Addr,
    pub self_redemption: bool,
    /// Tokens released by the bridge
    pub total_amount: Uint128,
    pub recipient_amount: Uint128,
    /// Fee plus the tokens swapped for native gas
    pub relayer_amount: Uint128,
    pub relayer_fee: Uint128,
    pub to_native_amount: Uint128,
    /// Native gas forwarded from the caller to the recipient
    pub native_quote: Uint128,
    /// Attached native returned to the caller
    pub native_refund: Uint128,
}

/// Largest token amount whose native value stays within the swap cap.
///
/// Zero when swaps are disabled (zero rate or zero cap).
pub fn max_swap_amount_in(cap: Uint128, rate: Uint128, precision: Uint128) -> Uint128 {
    if rate.is_zero() || cap.is_zero() {
        return Uint128::zero();
    }
    saturate(cap.full_mul(precision) / Uint256::from(rate))
}

/// Native units paid out for `to_native_amount` tokens, never above the cap.
pub fn native_swap_amount_out(
    to_native_amount: Uint128,
    rate: Uint128,
    precision: Uint128,
    cap: Uint128,
) -> Uint128 {
    if to_native_amount.is_zero() || precision.is_zero() {
        return Uint128::zero();
    }
    let quote = saturate(to_native_amount.full_mul(rate) / Uint256::from(precision));
    min(quote, cap)
}

/// Split a verified transfer between recipient and relayer.
pub fn plan_redemption(input: &RedemptionInput) -> Result<RedemptionPlan, ContractError> {
    let total_amount = denormalize(input.amount, input.decimals)?;

    if input.caller == input.recipient {
        if !input.attached_native.is_zero() {
            return Err(ContractError::RecipientCannotSwap);
        }
        return Ok(RedemptionPlan {
            recipient: input.recipient.clone(),
            relayer: input.caller.clone(),
            self_redemption: true,
            total_amount,
            recipient_amount: total_amount,
            relayer_amount: Uint128::zero(),
            relayer_fee: Uint128::zero(),
            to_native_amount: Uint128::zero(),
            native_quote: Uint128::zero(),
            native_refund: Uint128::zero(),
        });
    }

    let encoded_fee = denormalize(input.payload.target_relayer_fee, input.decimals)?;
    let relayer_fee = min(encoded_fee, input.local_relayer_fee);

    let requested_to_native = denormalize(input.payload.to_native_token_amount, input.decimals)?;
    let max_to_native = max_swap_amount_in(
        input.max_native_swap_amount,
        input.swap_rate,
        input.swap_rate_precision,
    );
    let mut to_native_amount = min(requested_to_native, max_to_native);

    let native_quote = native_swap_amount_out(
        to_native_amount,
        input.swap_rate,
        input.swap_rate_precision,
        input.max_native_swap_amount,
    );
    // a swap worth nothing diverts nothing
    if native_quote.is_zero() {
        to_native_amount = Uint128::zero();
    }

    if input.attached_native < native_quote {
        return Err(ContractError::InsufficientNativeAssetAmount {
            required: native_quote,
            provided: input.attached_native,
        });
    }
    let native_refund = input.attached_native - native_quote;

    let relayer_amount = relayer_fee
        .checked_add(to_native_amount)
        .map_err(|_| ContractError::PayoutInvariantViolated)?;
    let recipient_amount = total_amount
        .checked_sub(relayer_amount)
        .map_err(|_| ContractError::PayoutInvariantViolated)?;

    Ok(RedemptionPlan {
        recipient: input.recipient.clone(),
        relayer: input.caller.clone(),
        self_redemption: false,
        total_amount,
        recipient_amount,
        relayer_amount,
        relayer_fee,
        to_native_amount,
        native_quote,
        native_refund,
    })
}

fn saturate(value: Uint256) -> Uint128 {
    Uint128::try_from(value).unwrap_or(Uint128::MAX)
}
