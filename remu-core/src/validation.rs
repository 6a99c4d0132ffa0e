//! Input validation for simulation parameters and fiscal rate tables.
//!
//! Validation is the only failure surface of the engine: once a
//! [`SimulationParameters`](crate::SimulationParameters) bundle or a
//! [`TaxRates`](crate::TaxRates) table has been accepted, every calculation
//! stage is total over its domain.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Largest monetary value accepted, one thousand billion euros.
///
/// Keeps every product and sum of the pipeline inside [`Decimal`]'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Lower bound accepted for the family-quotient divisor.
pub const MIN_FISCAL_SHARES: Decimal = dec!(0.5);

/// Upper bound accepted for the family-quotient divisor.
pub const MAX_FISCAL_SHARES: Decimal = dec!(6.0);

/// Upper bound for configured rates. Contribution rates are expressed as a
/// multiple of net compensation, so they can exceed 1.
pub const MAX_CONFIGURED_RATE: Decimal = Decimal::TWO;

/// Rough total-cost multiplier used by the dividend feasibility pre-check.
///
/// Looser than the real 0.82 / 0.45 contribution multipliers: inputs that pass
/// this check may still be clamped by the compensation stage.
pub const DIVIDEND_FEASIBILITY_COST_FACTOR: Decimal = dec!(1.5);

/// Errors raised while assembling simulation inputs or rate tables.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A monetary value was negative.
    #[error("{field} cannot be negative, got {value} €")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// A monetary value exceeded [`MAX_AMOUNT`].
    #[error("{field} cannot exceed {max} €, got {value} €")]
    AmountTooLarge {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    /// A monetary value that must be strictly positive was zero or negative.
    #[error("{field} must be strictly positive, got {value} €")]
    NonPositiveAmount { field: &'static str, value: Decimal },

    /// A configured rate fell outside its declared bounds.
    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidRate {
        field: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    /// The number of fiscal shares is outside the legal range.
    #[error("fiscal shares must be between 0.5 and 6.0, got {0}")]
    InvalidFiscalShares(Decimal),

    /// Operating expenses are larger than the revenue.
    #[error("operating expenses ({expenses} €) cannot exceed revenue ({revenue} €)")]
    ExpensesExceedRevenue { expenses: Decimal, revenue: Decimal },

    /// The annual target compensation is larger than the revenue.
    #[error("annual target compensation ({compensation} €) cannot exceed revenue ({revenue} €)")]
    CompensationExceedsRevenue {
        compensation: Decimal,
        revenue: Decimal,
    },

    /// Dividends were requested but the estimated profit left after
    /// compensation is negative.
    #[error(
        "cannot distribute dividends: estimated profit after compensation is negative \
         ({remaining_profit} €); lower the target compensation or disable dividends"
    )]
    DividendsNotFeasible { remaining_profit: Decimal },

    /// No rate table ships for the requested fiscal year.
    #[error("tax rates for year {requested} are not available; supported years: {supported:?}")]
    UnsupportedYear {
        requested: i32,
        supported: Vec<i32>,
    },

    /// A rate table declares a year outside the plausible range.
    #[error("invalid fiscal year: {0}")]
    InvalidYear(i32),

    /// The status name is not one of the recognised legal statuses.
    #[error("invalid status: {0}; expected SASU or EURL")]
    InvalidStatus(String),

    /// A rate table has no income-tax bracket.
    #[error("at least one income tax bracket must be defined")]
    NoIncomeTaxBrackets,

    /// Income-tax bracket thresholds are not strictly increasing.
    #[error("income tax brackets must be ordered by strictly increasing threshold")]
    UnorderedIncomeTaxBrackets,

    /// An unbounded bracket appears before the end of the schedule.
    #[error("only the last income tax bracket may be unbounded")]
    UnboundedBracketNotLast,

    /// The last bracket of the schedule has a finite threshold.
    #[error("the last income tax bracket must be unbounded")]
    MissingUnboundedBracket,

    /// The share capital is below the recommended minimum for the status.
    #[error("share capital too low for EURL: {capital} €; recommended minimum: {minimum} €")]
    ShareCapitalTooLow { capital: Decimal, minimum: Decimal },
}

/// Checks that a monetary value lies within `[0, MAX_AMOUNT]`.
pub fn non_negative_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            field,
            value,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// Checks that a monetary value is strictly positive.
pub fn positive_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    non_negative_amount(field, value)?;
    if value == Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount { field, value });
    }
    Ok(())
}

/// Checks that a rate lies within `[min, max]`.
pub fn rate_within(
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::InvalidRate {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Checks a configured rate against the generous `[0, 2]` bound.
pub fn configured_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    rate_within(field, value, Decimal::ZERO, MAX_CONFIGURED_RATE)
}

/// Checks the family-quotient divisor.
pub fn fiscal_shares(value: Decimal) -> Result<(), ValidationError> {
    if value < MIN_FISCAL_SHARES || value > MAX_FISCAL_SHARES {
        return Err(ValidationError::InvalidFiscalShares(value));
    }
    Ok(())
}

/// Operating expenses may not exceed revenue.
pub fn revenue_covers_expenses(
    revenue: Decimal,
    expenses: Decimal,
) -> Result<(), ValidationError> {
    if expenses > revenue {
        return Err(ValidationError::ExpensesExceedRevenue { expenses, revenue });
    }
    Ok(())
}

/// The annual target compensation may not exceed revenue.
pub fn revenue_covers_compensation(
    annual_compensation: Decimal,
    revenue: Decimal,
) -> Result<(), ValidationError> {
    if annual_compensation > revenue {
        return Err(ValidationError::CompensationExceedsRevenue {
            compensation: annual_compensation,
            revenue,
        });
    }
    Ok(())
}

/// When dividends are requested, the profit left after a rough compensation
/// cost estimate must not be negative.
pub fn dividends_feasible(
    revenue: Decimal,
    expenses: Decimal,
    annual_compensation: Decimal,
    distribute_dividends: bool,
) -> Result<(), ValidationError> {
    if !distribute_dividends {
        return Ok(());
    }

    let estimated_cost = annual_compensation * DIVIDEND_FEASIBILITY_COST_FACTOR;
    let remaining_profit = revenue - expenses - estimated_cost;

    if remaining_profit < Decimal::ZERO {
        return Err(ValidationError::DividendsNotFeasible { remaining_profit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // monetary value tests
    // =========================================================================

    #[test]
    fn non_negative_amount_accepts_zero() {
        assert_eq!(non_negative_amount("revenue", dec!(0)), Ok(()));
    }

    #[test]
    fn non_negative_amount_rejects_negative() {
        let result = non_negative_amount("revenue", dec!(-1));

        assert_eq!(
            result,
            Err(ValidationError::NegativeAmount {
                field: "revenue",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn non_negative_amount_accepts_ceiling() {
        assert_eq!(non_negative_amount("revenue", MAX_AMOUNT), Ok(()));
    }

    #[test]
    fn non_negative_amount_rejects_above_ceiling() {
        let result = non_negative_amount("revenue", Decimal::MAX);

        assert_eq!(
            result,
            Err(ValidationError::AmountTooLarge {
                field: "revenue",
                value: Decimal::MAX,
                max: MAX_AMOUNT,
            })
        );
    }

    #[test]
    fn positive_amount_rejects_zero() {
        let result = positive_amount("share capital", dec!(0));

        assert_eq!(
            result,
            Err(ValidationError::NonPositiveAmount {
                field: "share capital",
                value: dec!(0),
            })
        );
    }

    #[test]
    fn positive_amount_reports_negative_as_negative() {
        let result = positive_amount("share capital", dec!(-5));

        assert_eq!(
            result,
            Err(ValidationError::NegativeAmount {
                field: "share capital",
                value: dec!(-5),
            })
        );
    }

    // =========================================================================
    // rate tests
    // =========================================================================

    #[test]
    fn configured_rate_accepts_bounds() {
        assert_eq!(configured_rate("flat_tax_rate", dec!(0)), Ok(()));
        assert_eq!(configured_rate("flat_tax_rate", dec!(2)), Ok(()));
    }

    #[test]
    fn configured_rate_rejects_above_two() {
        let result = configured_rate("sasu_social_charges_rate", dec!(2.01));

        assert_eq!(
            result,
            Err(ValidationError::InvalidRate {
                field: "sasu_social_charges_rate",
                value: dec!(2.01),
                min: dec!(0),
                max: dec!(2),
            })
        );
    }

    // =========================================================================
    // fiscal shares tests
    // =========================================================================

    #[test]
    fn fiscal_shares_accepts_range_bounds() {
        assert_eq!(fiscal_shares(dec!(0.5)), Ok(()));
        assert_eq!(fiscal_shares(dec!(6.0)), Ok(()));
    }

    #[test]
    fn fiscal_shares_rejects_out_of_range() {
        assert_eq!(
            fiscal_shares(dec!(0.4)),
            Err(ValidationError::InvalidFiscalShares(dec!(0.4)))
        );
        assert_eq!(
            fiscal_shares(dec!(6.5)),
            Err(ValidationError::InvalidFiscalShares(dec!(6.5)))
        );
    }

    // =========================================================================
    // business rule tests
    // =========================================================================

    #[test]
    fn expenses_equal_to_revenue_are_accepted() {
        assert_eq!(revenue_covers_expenses(dec!(1000), dec!(1000)), Ok(()));
    }

    #[test]
    fn dividends_feasible_skips_check_when_not_distributing() {
        let result = dividends_feasible(dec!(50000), dec!(10000), dec!(35000), false);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn dividends_feasible_uses_one_and_a_half_cost_factor() {
        // 50000 - 10000 - 35000 * 1.5 = -12500
        let result = dividends_feasible(dec!(50000), dec!(10000), dec!(35000), true);

        assert_eq!(
            result,
            Err(ValidationError::DividendsNotFeasible {
                remaining_profit: dec!(-12500),
            })
        );
    }

    #[test]
    fn dividends_feasible_accepts_exact_break_even() {
        // 100000 - 10000 - 60000 * 1.5 = 0
        let result = dividends_feasible(dec!(100000), dec!(10000), dec!(60000), true);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn error_messages_name_the_offending_value() {
        let err = ValidationError::ExpensesExceedRevenue {
            expenses: dec!(2000),
            revenue: dec!(1000),
        };

        assert_eq!(
            err.to_string(),
            "operating expenses (2000 €) cannot exceed revenue (1000 €)"
        );
    }
}
