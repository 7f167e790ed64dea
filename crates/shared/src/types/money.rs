//! Money helpers with fixed two-digit decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Everything here operates on `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits carried by every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Rounds half-up (midpoint away from zero) to `dp` fractional digits.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value` rounded half-up and rescaled to exactly two fractional digits.
///
/// `1000` becomes `1000.00` and `12.345` becomes `12.35`.
#[must_use]
pub fn to_money_scale(value: Decimal) -> Decimal {
    let mut scaled = round_half_up(value, MONEY_SCALE);
    scaled.rescale(MONEY_SCALE);
    scaled
}

/// Returns true if the value carries no more than two significant fractional digits.
#[must_use]
pub fn has_cent_precision(value: Decimal) -> bool {
    value.normalize().scale() <= MONEY_SCALE
}
