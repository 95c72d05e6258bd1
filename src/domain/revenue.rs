//! Estimated USD revenue of a deal.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when an exchange rate cannot be used as a divisor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevenueError {
    #[error("exchange rate must be positive, got {0}")]
    InvalidRate(Decimal),
}

/// Estimates the USD margin of moving `target` RUB between the two sides.
///
/// `usd_in` is the USD cost of acquiring the target amount from side A
/// including A's fee markup; `usd_out` is the USD obtained paying the
/// target out to side B net of B's fee deduction. Fees are fractions of
/// one. Notional multiplier is 1 (no volume scaling).
///
/// All arithmetic stays in exact decimals; both rates must be strictly
/// positive or `InvalidRate` is returned before any division happens.
pub fn estimate_revenue_usd(
    target: Decimal,
    rate_a: Decimal,
    fee_a: Decimal,
    rate_b: Decimal,
    fee_b: Decimal,
) -> Result<Decimal, RevenueError> {
    if rate_a <= Decimal::ZERO {
        return Err(RevenueError::InvalidRate(rate_a));
    }
    if rate_b <= Decimal::ZERO {
        return Err(RevenueError::InvalidRate(rate_b));
    }

    let usd_in = target / rate_a * (Decimal::ONE + fee_a);
    let usd_out = target / rate_b * (Decimal::ONE - fee_b);

    Ok(usd_in - usd_out)
}
