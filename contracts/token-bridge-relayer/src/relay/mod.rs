//! Relay protocol logic with no storage or chain access.
//!
//! - `transfer` - validation and amounts of an outbound transfer
//! - `redemption` - payout split of an inbound transfer
//!
//! Handlers in `execute/` gather registry values into the inputs below, call
//! the planner, and only turn the returned plan into messages once it has
//! been fully validated.

pub mod redemption;
pub mod transfer;

pub use redemption::{
    max_swap_amount_in, native_swap_amount_out, plan_redemption, RedemptionInput,
    RedemptionPlan, RedemptionStage,
};
pub use transfer::{plan_transfer, TransferContext, TransferPlan, TransferRequest};
