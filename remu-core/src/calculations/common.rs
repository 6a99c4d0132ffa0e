//! Shared helpers for the calculation stages.
//!
//! Stages work on exact [`Decimal`] values; rounding is a presentation concern.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
