//! Official fiscal rates for one year.
//!
//! The contribution rates are indicative averages (URSSAF averages for a
//! manager on the general scheme, TNS averages for the self-employed). Real
//! schedules depend on the exact situation of the company and its manager.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TaxBracket;
use crate::validation::{self, ValidationError};

/// Years a rate table may declare.
pub const PLAUSIBLE_YEARS: RangeInclusive<i32> = 2020..=2030;

/// Years for which an official snapshot ships with the crate.
const SHIPPED_YEARS: [i32; 1] = [2024];

/// Rates and thresholds used by both status pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    pub year: i32,

    /// Progressive income tax schedule, per fiscal share.
    pub income_tax_brackets: Vec<TaxBracket>,

    /// Reduced corporate tax rate (IS), applied up to the threshold.
    pub corporate_tax_reduced_rate: Decimal,

    /// Normal corporate tax rate, applied above the threshold.
    pub corporate_tax_normal_rate: Decimal,

    /// Profit ceiling for the reduced corporate tax rate.
    pub corporate_tax_threshold: Decimal,

    /// Single flat rate on dividends (PFU: 12.8% income tax + 17.2% social levies).
    pub flat_tax_rate: Decimal,

    /// Social levies on capital income (CSG, CRDS and others).
    pub social_levy_rate: Decimal,

    /// SASU employer plus employee contributions, as a share of net pay.
    pub sasu_social_charges_rate: Decimal,

    /// EURL manager (TNS) contributions, as a share of net pay.
    pub eurl_tns_social_charges_rate: Decimal,

    /// EURL contributions on dividends above the capital threshold.
    pub eurl_dividend_social_charges_rate: Decimal,

    /// EURL dividends above this share of the capital bear contributions.
    pub eurl_dividend_capital_threshold_rate: Decimal,

    /// Flat professional-expense deduction on salaries.
    pub professional_expense_deduction_rate: Decimal,

    /// Ceiling of the professional-expense deduction.
    pub professional_expense_deduction_cap: Decimal,

    /// Allowance on dividends taxed under the progressive option.
    pub dividend_allowance_rate: Decimal,
}

impl TaxRates {
    /// Returns the official rate table for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedYear`] when no snapshot ships for
    /// the requested year.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use remu_core::TaxRates;
    ///
    /// let rates = TaxRates::for_year(2024).unwrap();
    /// assert_eq!(rates.income_tax_brackets.len(), 5);
    /// assert_eq!(rates.corporate_tax_threshold, dec!(42500));
    ///
    /// assert!(TaxRates::for_year(2023).is_err());
    /// ```
    pub fn for_year(year: i32) -> Result<Self, ValidationError> {
        debug!(year, "looking up fiscal rate table");
        match year {
            2024 => Self::official_2024(),
            _ => Err(ValidationError::UnsupportedYear {
                requested: year,
                supported: Self::supported_years().to_vec(),
            }),
        }
    }

    /// Years with a shipped rate table.
    pub fn supported_years() -> &'static [i32] {
        &SHIPPED_YEARS
    }

    /// 2024 rates (2023 income brackets, article 219 and 200 A of the CGI).
    fn official_2024() -> Result<Self, ValidationError> {
        Ok(Self {
            year: 2024,
            income_tax_brackets: vec![
                TaxBracket::bounded(dec!(11294), dec!(0.00))?,
                TaxBracket::bounded(dec!(28797), dec!(0.11))?,
                TaxBracket::bounded(dec!(82341), dec!(0.30))?,
                TaxBracket::bounded(dec!(177106), dec!(0.41))?,
                TaxBracket::unbounded(dec!(0.45))?,
            ],
            corporate_tax_reduced_rate: dec!(0.15),
            corporate_tax_normal_rate: dec!(0.25),
            corporate_tax_threshold: dec!(42500),
            flat_tax_rate: dec!(0.30),
            social_levy_rate: dec!(0.172),
            sasu_social_charges_rate: dec!(0.82),
            eurl_tns_social_charges_rate: dec!(0.45),
            eurl_dividend_social_charges_rate: dec!(0.45),
            eurl_dividend_capital_threshold_rate: dec!(0.10),
            professional_expense_deduction_rate: dec!(0.10),
            professional_expense_deduction_cap: dec!(14171),
            dividend_allowance_rate: dec!(0.40),
        })
    }

    /// Validates every invariant of the table.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if:
    /// - `year` is outside 2020..=2030
    /// - any rate is outside `[0, 2]`
    /// - the corporate tax threshold is not strictly positive
    /// - the deduction cap is negative
    /// - the income tax schedule is empty, unordered, or not terminated by
    ///   exactly one unbounded bracket
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !PLAUSIBLE_YEARS.contains(&self.year) {
            return Err(ValidationError::InvalidYear(self.year));
        }

        let rates = [
            ("corporate_tax_reduced_rate", self.corporate_tax_reduced_rate),
            ("corporate_tax_normal_rate", self.corporate_tax_normal_rate),
            ("flat_tax_rate", self.flat_tax_rate),
            ("social_levy_rate", self.social_levy_rate),
            ("sasu_social_charges_rate", self.sasu_social_charges_rate),
            ("eurl_tns_social_charges_rate", self.eurl_tns_social_charges_rate),
            (
                "eurl_dividend_social_charges_rate",
                self.eurl_dividend_social_charges_rate,
            ),
            (
                "eurl_dividend_capital_threshold_rate",
                self.eurl_dividend_capital_threshold_rate,
            ),
            (
                "professional_expense_deduction_rate",
                self.professional_expense_deduction_rate,
            ),
            ("dividend_allowance_rate", self.dividend_allowance_rate),
        ];
        for (field, value) in rates {
            validation::configured_rate(field, value)?;
        }

        validation::positive_amount("corporate tax threshold", self.corporate_tax_threshold)?;
        validation::non_negative_amount(
            "professional expense deduction cap",
            self.professional_expense_deduction_cap,
        )?;

        self.validate_income_tax_brackets()
    }

    fn validate_income_tax_brackets(&self) -> Result<(), ValidationError> {
        let Some((last, bounded)) = self.income_tax_brackets.split_last() else {
            return Err(ValidationError::NoIncomeTaxBrackets);
        };

        for bracket in &self.income_tax_brackets {
            bracket.validate()?;
        }

        if last.upper_threshold.is_some() {
            return Err(ValidationError::MissingUnboundedBracket);
        }

        let mut previous: Option<Decimal> = None;
        for bracket in bounded {
            let threshold = bracket
                .upper_threshold
                .ok_or(ValidationError::UnboundedBracketNotLast)?;
            if previous.is_some_and(|p| threshold <= p) {
                return Err(ValidationError::UnorderedIncomeTaxBrackets);
            }
            previous = Some(threshold);
        }

        Ok(())
    }
}
