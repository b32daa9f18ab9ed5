//! Simple-interest reward computation.

use vesta_types::time::YEAR_MILLIS;
use vesta_types::BPS_DENOMINATOR;

/// Reward earned by `principal` at `rate_bps` per year over `elapsed_ms`.
///
/// Multiplies everything first and divides once, so the result is the exact
/// quotient truncated toward zero. Returns `None` on overflow.
pub fn accrued_reward(principal: u128, rate_bps: u32, elapsed_ms: u64) -> Option<u128> {
    if principal == 0 || rate_bps == 0 || elapsed_ms == 0 {
        return Some(0);
    }
    let numerator = principal
        .checked_mul(rate_bps as u128)?
        .checked_mul(elapsed_ms as u128)?;
    Some(numerator / (BPS_DENOMINATOR * YEAR_MILLIS as u128))
}
