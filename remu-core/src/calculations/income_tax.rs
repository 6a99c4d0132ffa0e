//! Progressive personal income tax with the family quotient.
//!
//! Taxable income is divided by the number of fiscal shares, the bracket
//! schedule is applied to the per-share income, and the per-share tax is
//! multiplied back by the number of shares.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use remu_core::TaxRates;
//! use remu_core::calculations::IncomeTaxSchedule;
//!
//! let rates = TaxRates::for_year(2024).unwrap();
//! let schedule = IncomeTaxSchedule::new(&rates.income_tax_brackets);
//!
//! // 17503 * 11% + 14403 * 30%
//! assert_eq!(schedule.calculate(dec!(43200), dec!(1)), dec!(6246.23));
//! assert_eq!(schedule.marginal_rate(dec!(43200), dec!(1)), dec!(0.30));
//! ```

use rust_decimal::Decimal;

use crate::TaxBracket;

/// Progressive schedule over an ordered slice of brackets.
///
/// Brackets must be sorted by increasing threshold with the unbounded bracket
/// last, as enforced by [`TaxRates::validate`](crate::TaxRates::validate).
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> IncomeTaxSchedule<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Total income tax on `taxable_income` for a household of
    /// `fiscal_shares` shares.
    ///
    /// Income exactly on a threshold is taxed entirely in the lower bracket.
    ///
    /// # Panics
    ///
    /// Panics if `fiscal_shares` is zero. [`SimulationParameters`] only
    /// admits values in `[0.5, 6.0]`.
    ///
    /// [`SimulationParameters`]: crate::SimulationParameters
    pub fn calculate(
        &self,
        taxable_income: Decimal,
        fiscal_shares: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let per_share_income = taxable_income / fiscal_shares;
        let mut per_share_tax = Decimal::ZERO;
        let mut previous_threshold = Decimal::ZERO;

        for bracket in self.brackets {
            match bracket.upper_threshold {
                Some(threshold) if per_share_income > threshold => {
                    per_share_tax += (threshold - previous_threshold) * bracket.rate;
                    previous_threshold = threshold;
                }
                _ => {
                    per_share_tax += (per_share_income - previous_threshold) * bracket.rate;
                    break;
                }
            }
        }

        per_share_tax * fiscal_shares
    }

    /// Rate of the bracket the last euro of per-share income falls into.
    ///
    /// Falls back to the top rate when no bracket contains the income.
    ///
    /// # Panics
    ///
    /// Panics if `fiscal_shares` is zero.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
        fiscal_shares: Decimal,
    ) -> Decimal {
        let per_share_income = taxable_income / fiscal_shares;

        self.brackets
            .iter()
            .find(|bracket| bracket.contains(per_share_income))
            .or_else(|| self.brackets.last())
            .map_or(Decimal::ZERO, |bracket| bracket.rate)
    }
}
