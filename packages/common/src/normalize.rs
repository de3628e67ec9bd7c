//! Cross-chain amount normalization.
//!
//! Amounts travel between chains at a fixed precision of 8 decimals. Tokens
//! with more decimals lose their trailing digits ("dust") on the way out;
//! tokens with 8 decimals or fewer pass through unchanged.
//!
//! | decimals | normalize(x)            | denormalize(n)          |
//! |----------|-------------------------|-------------------------|
//! | <= 8     | x                       | n                       |
//! | > 8      | x / 10^(decimals - 8)   | n * 10^(decimals - 8)   |

use cosmwasm_std::{OverflowError, OverflowOperation, Uint128};

/// Precision of every amount carried in a cross-chain message.
pub const NORMALIZED_DECIMALS: u8 = 8;

/// Number of decimals above the normalized precision, if any.
fn excess_decimals(decimals: u8) -> Option<u32> {
    match decimals.checked_sub(NORMALIZED_DECIMALS) {
        Some(excess) if excess > 0 => Some(u32::from(excess)),
        _ => None,
    }
}

/// Scale a native amount down to 8 decimals, truncating toward zero.
///
/// A result of zero is a valid output; callers decide whether a zero
/// normalized amount is acceptable.
pub fn normalize(amount: Uint128, decimals: u8) -> Uint128 {
    let Some(exp) = excess_decimals(decimals) else {
        return amount;
    };
    match 10u128.checked_pow(exp) {
        Some(divisor) => Uint128::new(amount.u128() / divisor),
        // 10^exp exceeds u128, so every representable amount is dust
        None => Uint128::zero(),
    }
}

/// Scale an 8-decimal amount back up to the token's native decimals.
pub fn denormalize(amount: Uint128, decimals: u8) -> Result<Uint128, OverflowError> {
    let Some(exp) = excess_decimals(decimals) else {
        return Ok(amount);
    };
    if amount.is_zero() {
        return Ok(amount);
    }
    let multiplier = 10u128
        .checked_pow(exp)
        .ok_or_else(|| OverflowError::new(OverflowOperation::Pow, 10u128, exp))?;
    amount.checked_mul(Uint128::new(multiplier))
}

/// Split `amount` into the part representable at 8 decimals and the dust.
///
/// Returns `(kept, dust)` with `kept == denormalize(normalize(amount))` and
/// `kept + dust == amount`.
pub fn truncate_dust(amount: Uint128, decimals: u8) -> (Uint128, Uint128) {
    let Some(exp) = excess_decimals(decimals) else {
        return (amount, Uint128::zero());
    };
    match 10u128.checked_pow(exp) {
        Some(divisor) => {
            let dust = Uint128::new(amount.u128() % divisor);
            (amount - dust, dust)
        }
        None => (Uint128::zero(), amount),
    }
}
