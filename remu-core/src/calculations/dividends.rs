//! Dividend distribution of the post-tax corporate result.
//!
//! Some statuses charge social contributions on part of the dividends before
//! any personal taxation. The remainder is then taxed either at the flat rate,
//! or (progressive option) at the social-levy rate with 60% of it folded into
//! the personal income-tax base.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::TaxRates;
use crate::calculations::common::non_negative;

/// Social contributions charged on gross dividends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividendContributionRule {
    /// Dividends bear no social contributions.
    None,

    /// `rate` applies to the part of the dividends above `threshold`.
    AboveThreshold { threshold: Decimal, rate: Decimal },
}

impl DividendContributionRule {
    /// Contributions owed on `gross_dividends`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use remu_core::calculations::DividendContributionRule;
    ///
    /// let rule = DividendContributionRule::AboveThreshold {
    ///     threshold: dec!(100),
    ///     rate: dec!(0.45),
    /// };
    /// assert_eq!(rule.contributions(dec!(17340)), dec!(7758));
    /// assert_eq!(rule.contributions(dec!(80)), dec!(0));
    /// assert_eq!(DividendContributionRule::None.contributions(dec!(17340)), dec!(0));
    /// ```
    pub fn contributions(
        &self,
        gross_dividends: Decimal,
    ) -> Decimal {
        match *self {
            DividendContributionRule::None => Decimal::ZERO,
            DividendContributionRule::AboveThreshold { threshold, rate } => {
                non_negative(gross_dividends - threshold) * rate
            }
        }
    }
}

/// How dividends are taxed personally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendTaxation {
    pub flat_tax_rate: Decimal,
    pub social_levy_rate: Decimal,

    /// Fraction of dividends exempted under the progressive option.
    pub allowance_rate: Decimal,
    pub progressive: bool,
}

impl DividendTaxation {
    pub fn from_rates(
        rates: &TaxRates,
        progressive: bool,
    ) -> Self {
        Self {
            flat_tax_rate: rates.flat_tax_rate,
            social_levy_rate: rates.social_levy_rate,
            allowance_rate: rates.dividend_allowance_rate,
            progressive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendBreakdown {
    pub gross_dividends: Decimal,
    pub social_contributions: Decimal,
    pub tax: Decimal,
    pub net_dividends: Decimal,

    /// Share of the dividends added to the personal income-tax base.
    pub taxable_income: Decimal,
}

impl DividendBreakdown {
    pub const NONE: Self = Self {
        gross_dividends: Decimal::ZERO,
        social_contributions: Decimal::ZERO,
        tax: Decimal::ZERO,
        net_dividends: Decimal::ZERO,
        taxable_income: Decimal::ZERO,
    };
}

/// Distributes `gross_dividends`.
///
/// Returns [`DividendBreakdown::NONE`] for a zero or negative amount.
pub fn distribute(
    gross_dividends: Decimal,
    rule: DividendContributionRule,
    taxation: DividendTaxation,
) -> DividendBreakdown {
    if gross_dividends <= Decimal::ZERO {
        return DividendBreakdown::NONE;
    }

    let social_contributions = rule.contributions(gross_dividends);
    if social_contributions > Decimal::ZERO {
        warn!(
            gross_dividends = %gross_dividends,
            social_contributions = %social_contributions,
            "Dividends above the capital threshold bear social contributions"
        );
    }
    let after_contributions = gross_dividends - social_contributions;

    let (tax, taxable_income) = if taxation.progressive {
        (
            after_contributions * taxation.social_levy_rate,
            after_contributions * (Decimal::ONE - taxation.allowance_rate),
        )
    } else {
        (after_contributions * taxation.flat_tax_rate, Decimal::ZERO)
    };

    let net_dividends = after_contributions - tax;
    debug!(
        gross_dividends = %gross_dividends,
        social_contributions = %social_contributions,
        tax = %tax,
        net_dividends = %net_dividends,
        progressive = taxation.progressive,
        "Dividends distributed"
    );

    DividendBreakdown {
        gross_dividends,
        social_contributions,
        tax,
        net_dividends,
        taxable_income,
    }
}
