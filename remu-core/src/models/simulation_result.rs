use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LegalStatus;
use crate::calculations::common::MONTHS_PER_YEAR;

/// Every value computed by one status pipeline.
///
/// Built once per simulation and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub status: LegalStatus,
    pub revenue: Decimal,
    pub operating_expenses: Decimal,

    /// Revenue minus operating expenses.
    pub profit_before_compensation: Decimal,

    /// Display-only approximation of gross pay. Not a payroll figure and not
    /// used by any later stage: SASU adds 55% of the contributions to the net,
    /// EURL multiplies the net by 1.31.
    pub gross_compensation: Decimal,

    /// Social contributions charged on the compensation.
    pub social_contributions: Decimal,
    pub net_compensation: Decimal,

    /// Never negative: compensation cost is capped at the available profit.
    pub profit_after_compensation: Decimal,
    pub corporate_tax: Decimal,

    /// Corporate result after corporate tax.
    pub post_tax_result: Decimal,

    pub gross_dividends: Decimal,

    /// Social contributions on dividends (EURL only).
    pub dividend_social_contributions: Decimal,

    /// Flat tax, or social levies only under the progressive option.
    pub dividend_tax: Decimal,
    pub net_dividends: Decimal,

    /// Base of the progressive personal income tax.
    pub taxable_income: Decimal,
    pub income_tax: Decimal,

    /// Net compensation plus net dividends minus income tax.
    pub disposable_income: Decimal,

    /// Total levies as a fraction of revenue; zero when revenue is zero.
    pub overall_levy_rate: Decimal,
}

impl SimulationResult {
    /// Disposable income spread over twelve months.
    pub fn monthly_disposable_income(&self) -> Decimal {
        self.disposable_income / MONTHS_PER_YEAR
    }

    /// Everything taken by contributions and taxes.
    pub fn total_levies(&self) -> Decimal {
        self.social_contributions
            + self.dividend_social_contributions
            + self.corporate_tax
            + self.dividend_tax
            + self.income_tax
    }
}

/// Side-by-side results of both statuses for one parameter bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub sasu: SimulationResult,
    pub eurl: SimulationResult,
}

impl ComparisonResult {
    /// Status leaving the larger disposable income. Ties go to SASU.
    pub fn best_status(&self) -> LegalStatus {
        if self.eurl.disposable_income > self.sasu.disposable_income {
            LegalStatus::Eurl
        } else {
            LegalStatus::Sasu
        }
    }

    /// Result for `status`.
    pub fn result(
        &self,
        status: LegalStatus,
    ) -> &SimulationResult {
        match status {
            LegalStatus::Sasu => &self.sasu,
            LegalStatus::Eurl => &self.eurl,
        }
    }

    /// Absolute yearly gap in disposable income between the two statuses.
    pub fn annual_difference(&self) -> Decimal {
        (self.eurl.disposable_income - self.sasu.disposable_income).abs()
    }

    pub fn monthly_difference(&self) -> Decimal {
        self.annual_difference() / MONTHS_PER_YEAR
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn result(
        status: LegalStatus,
        disposable_income: Decimal,
    ) -> SimulationResult {
        SimulationResult {
            status,
            revenue: dec!(100000),
            operating_expenses: dec!(10000),
            profit_before_compensation: dec!(90000),
            gross_compensation: dec!(0),
            social_contributions: dec!(1000),
            net_compensation: dec!(0),
            profit_after_compensation: dec!(0),
            corporate_tax: dec!(200),
            post_tax_result: dec!(0),
            gross_dividends: dec!(0),
            dividend_social_contributions: dec!(300),
            dividend_tax: dec!(400),
            net_dividends: dec!(0),
            taxable_income: dec!(0),
            income_tax: dec!(500),
            disposable_income,
            overall_levy_rate: dec!(0),
        }
    }

    #[test]
    fn total_levies_sums_every_levy() {
        let r = result(LegalStatus::Eurl, dec!(0));

        assert_eq!(r.total_levies(), dec!(2400));
    }

    #[test]
    fn monthly_disposable_income_divides_by_twelve() {
        let r = result(LegalStatus::Sasu, dec!(48000));

        assert_eq!(r.monthly_disposable_income(), dec!(4000));
    }

    #[test]
    fn best_status_prefers_larger_disposable_income() {
        let comparison = ComparisonResult {
            sasu: result(LegalStatus::Sasu, dec!(40000)),
            eurl: result(LegalStatus::Eurl, dec!(46000)),
        };

        assert_eq!(comparison.best_status(), LegalStatus::Eurl);
        assert_eq!(comparison.annual_difference(), dec!(6000));
        assert_eq!(comparison.monthly_difference(), dec!(500));
    }

    #[test]
    fn best_status_tie_goes_to_sasu() {
        let comparison = ComparisonResult {
            sasu: result(LegalStatus::Sasu, dec!(40000)),
            eurl: result(LegalStatus::Eurl, dec!(40000)),
        };

        assert_eq!(comparison.best_status(), LegalStatus::Sasu);
        assert_eq!(comparison.annual_difference(), dec!(0));
    }

    #[test]
    fn annual_difference_is_absolute() {
        let comparison = ComparisonResult {
            sasu: result(LegalStatus::Sasu, dec!(50000)),
            eurl: result(LegalStatus::Eurl, dec!(44000)),
        };

        assert_eq!(comparison.best_status(), LegalStatus::Sasu);
        assert_eq!(comparison.annual_difference(), dec!(6000));
    }
}
