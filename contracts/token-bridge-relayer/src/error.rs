//! Error types for the token bridge relayer contract

use cosmwasm_std::{OverflowError, StdError, Uint128};
use relay_common::PayloadError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Payload(#[from] PayloadError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can confirm")]
    NotPendingOwner,

    #[error("No pending ownership transfer")]
    NoPendingOwner,

    #[error("Recipient cannot swap: self redemption must not attach native funds")]
    RecipientCannotSwap,

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Token not accepted: {token}")]
    TokenNotAccepted { token: String },

    #[error("Token not registered: {token}")]
    TokenNotRegistered { token: String },

    #[error("Target chain not registered: {chain_id}")]
    TargetNotRegistered { chain_id: u16 },

    #[error("Emitter is not the registered contract for chain {chain_id}")]
    ContractNotRegistered { chain_id: u16 },

    #[error("Invalid chain ID: {chain_id}")]
    InvalidChainId { chain_id: u16 },

    #[error("Invalid foreign contract address")]
    InvalidForeignContract,

    #[error("Invalid swap rate: must be greater than zero")]
    InvalidSwapRate,

    #[error("Invalid swap rate precision: must be greater than zero")]
    InvalidPrecision,

    #[error("Decimals of CW20 {token} are read from the token contract")]
    DecimalsNotConfigurable { token: String },

    // ========================================================================
    // Transfer Validation Errors
    // ========================================================================

    #[error("Target recipient must not be the zero address")]
    ZeroRecipient,

    #[error("Amount too small: nothing left after normalization")]
    AmountTooSmall,

    #[error("Insufficient amount: must exceed relayer fee plus native swap amount")]
    InsufficientAmount,

    #[error("Invalid address length: expected 32 bytes, got {len}")]
    InvalidAddressLength { len: usize },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    // ========================================================================
    // Redemption Errors
    // ========================================================================

    #[error("Insufficient native asset: required {required}, provided {provided}")]
    InsufficientNativeAssetAmount {
        required: Uint128,
        provided: Uint128,
    },

    #[error("Relayer fee plus swap amount exceeds the transferred amount")]
    PayoutInvariantViolated,

    #[error("Message verification failed: {reason}")]
    MessageVerificationFailed { reason: String },

    // ========================================================================
    // Reply Errors
    // ========================================================================

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    #[error("Token bridge did not report a sequence")]
    MissingSequence,
}
