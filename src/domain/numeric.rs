//! Locale-tolerant parsing of user-supplied numeric text.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when numeric text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("invalid number format: {0:?}")]
    InvalidNumberFormat(String),
}

/// Parses user input with either a comma or a dot as the decimal separator.
///
/// Surrounding and internal whitespace is stripped and every comma becomes
/// a dot before parsing, so "1 000,5" and "1000.5" produce the same exact
/// decimal. Monetary amounts and rates go through this, so the result is an
/// exact base-10 decimal, never a binary float.
pub fn normalize_number(input: &str) -> Result<Decimal, NumericError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Err(NumericError::InvalidNumberFormat(input.to_string()));
    }

    Decimal::from_str(&cleaned).map_err(|_| NumericError::InvalidNumberFormat(input.to_string()))
}

/// Converts a fee entered either in percent units or as a fraction into a
/// fraction of one: "1.5" -> 0.015, "0,5" -> 0.005, "0.015" -> 0.015.
///
/// The threshold is strictly `v > 1`: an input of exactly "1" stays 1
/// (meaning 100%), while "1.0001" becomes 0.010001 (~1%).
pub fn to_fraction_of_one(input: &str) -> Result<Decimal, NumericError> {
    let v = normalize_number(input)?;
    if v > Decimal::ONE {
        Ok(v / Decimal::ONE_HUNDRED)
    } else {
        Ok(v)
    }
}
