//! # Interest Calculation
//!
//! Simple (non-compounding) interest credited at purchase time.
//!
//! ```text
//! interest = principal * rate_bps * seconds_to_maturity / SECONDS_PER_YEAR / 10_000
//! ```
//!
//! Products are checked in 256 bits; division truncates.

use crate::domain::value_objects::{
    BasisPoints, Timestamp, BASIS_POINTS_DENOMINATOR, SECONDS_PER_YEAR, U256,
};
use crate::errors::LedgerError;

/// Interest owed on `principal` held from `now` until `maturity_date`.
///
/// Returns zero once `now >= maturity_date`.
///
/// # Errors
///
/// `LedgerError::ArithmeticOverflow` if an intermediate product exceeds 256 bits.
pub fn calculate_interest(
    principal: U256,
    interest_rate: BasisPoints,
    maturity_date: Timestamp,
    now: Timestamp,
) -> Result<U256, LedgerError> {
    let remaining = maturity_date.saturating_sub(now);
    if remaining == 0 || principal.is_zero() || interest_rate == 0 {
        return Ok(U256::zero());
    }

    let scaled = principal
        .checked_mul(U256::from(interest_rate))
        .and_then(|v| v.checked_mul(U256::from(remaining)))
        .ok_or(LedgerError::ArithmeticOverflow)?;

    Ok(scaled / U256::from(SECONDS_PER_YEAR) / U256::from(BASIS_POINTS_DENOMINATOR))
}

// =============================================================================
// TESTS
// =============================================================================
