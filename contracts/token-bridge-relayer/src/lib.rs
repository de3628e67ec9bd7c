//! Token Bridge Relayer Contract
//!
//! Wraps the token bridge's transfer-with-payload flow so that a third-party
//! relayer can deliver transfers on the recipient's behalf.
//!
//! # Outgoing Flow
//! 1. User sends a registered CW20 (or attaches a native coin) to this contract
//! 2. The contract checks the request against the registry and encodes a
//!    relay payload (relayer fee, native swap amount, final recipient)
//! 3. The token bridge locks the tokens and publishes the transfer; the
//!    returned sequence is reported back to the caller
//!
//! # Incoming Flow
//! 1. Anyone submits the delivered message with `CompleteTransferWithRelay`
//! 2. The bridge verifies it; the emitter must be the registered relayer
//!    contract of the source chain
//! 3. The bridge releases the tokens here and the contract splits them:
//!    the relayer receives its fee plus the tokens swapped for native gas,
//!    the recipient receives the rest plus the native gas
//!
//! A recipient redeeming for themselves pays no fee and performs no swap.

pub mod address_codec;
pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod relay;
pub mod state;

pub use crate::error::ContractError;
pub use crate::relay::{plan_redemption, plan_transfer, RedemptionStage};
