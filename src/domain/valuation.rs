//! Quantity-to-money valuation.

/// Rate used when no configuration overrides it.
pub const DEFAULT_RATE_PER_UNIT: f64 = 5.0;

/// Monetary value of `quantity` units at `rate` per unit. Full precision; rounding
/// happens only when the amount is displayed.
pub fn value(quantity: u32, rate: f64) -> f64 {
    f64::from(quantity) * rate
}

/// Returns `true` when `rate` can be used to value new records.
pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}
