//! Five-stage remuneration pipeline shared by every legal status.
//!
//! 1. compensation affordability
//! 2. corporate tax on the remaining profit
//! 3. dividend distribution of the post-tax result
//! 4. personal income tax on compensation and taxable dividends
//! 5. disposable income and overall levy rate
//!
//! The statuses only differ by a [`StatusProfile`]: the contribution
//! multiplier on net compensation, the dividend contribution rule and the
//! gross compensation shown to the user.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::non_negative;
use crate::calculations::compensation::resolve_compensation;
use crate::calculations::corporate_tax::CorporateTax;
use crate::calculations::dividends::{
    DividendBreakdown, DividendContributionRule, DividendTaxation, distribute,
};
use crate::calculations::income_tax::IncomeTaxSchedule;
use crate::validation::{MAX_FISCAL_SHARES, MIN_FISCAL_SHARES, ValidationError};
use crate::{ComparisonResult, LegalStatus, SimulationParameters, SimulationResult, TaxRates};

/// Display-only gross compensation estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrossCompensationDisplay {
    /// Net plus a share of the social contributions.
    NetPlusContributionShare(Decimal),
    /// Net times a fixed factor.
    NetTimes(Decimal),
}

impl GrossCompensationDisplay {
    pub fn estimate(
        &self,
        net_compensation: Decimal,
        social_contributions: Decimal,
    ) -> Decimal {
        match *self {
            Self::NetPlusContributionShare(share) => {
                net_compensation + social_contributions * share
            }
            Self::NetTimes(factor) => net_compensation * factor,
        }
    }
}

/// What distinguishes one legal status in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusProfile {
    pub status: LegalStatus,

    /// Social contributions as a multiple of net compensation.
    pub compensation_multiplier: Decimal,
    pub dividend_rule: DividendContributionRule,
    pub gross_display: GrossCompensationDisplay,
}

impl StatusProfile {
    /// Builds the profile of `status` from a rate table.
    ///
    /// `share_capital` only matters for statuses whose dividend contributions
    /// depend on it.
    pub fn new(
        status: LegalStatus,
        rates: &TaxRates,
        share_capital: Decimal,
    ) -> Self {
        match status {
            LegalStatus::Sasu => Self {
                status,
                compensation_multiplier: rates.sasu_social_charges_rate,
                dividend_rule: DividendContributionRule::None,
                gross_display: GrossCompensationDisplay::NetPlusContributionShare(dec!(0.55)),
            },
            LegalStatus::Eurl => Self {
                status,
                compensation_multiplier: rates.eurl_tns_social_charges_rate,
                dividend_rule: DividendContributionRule::AboveThreshold {
                    threshold: share_capital * rates.eurl_dividend_capital_threshold_rate,
                    rate: rates.eurl_dividend_social_charges_rate,
                },
                gross_display: GrossCompensationDisplay::NetTimes(dec!(1.31)),
            },
        }
    }
}

/// Runs simulations against one validated rate table.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use remu_core::{LegalStatus, SimulationInput, SimulationParameters, Simulator, TaxRates};
///
/// let rates = TaxRates::for_year(2024).unwrap();
/// let simulator = Simulator::new(&rates).unwrap();
/// let params = SimulationParameters::new(SimulationInput::default()).unwrap();
///
/// let sasu = simulator.simulate(LegalStatus::Sasu, &params);
/// assert_eq!(sasu.disposable_income, dec!(43324.57));
///
/// let comparison = simulator.compare(&params);
/// assert_eq!(comparison.best_status(), LegalStatus::Eurl);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    rates: &'a TaxRates,
}

impl<'a> Simulator<'a> {
    /// # Errors
    ///
    /// Returns the first inconsistency found by [`TaxRates::validate`].
    pub fn new(rates: &'a TaxRates) -> Result<Self, ValidationError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &'a TaxRates {
        self.rates
    }

    /// Runs the pipeline for `status`.
    pub fn simulate(
        &self,
        status: LegalStatus,
        params: &SimulationParameters,
    ) -> SimulationResult {
        let profile = StatusProfile::new(status, self.rates, params.share_capital());
        self.simulate_profile(&profile, params)
    }

    /// Runs the pipeline for every status.
    pub fn compare(
        &self,
        params: &SimulationParameters,
    ) -> ComparisonResult {
        let comparison = ComparisonResult {
            sasu: self.simulate(LegalStatus::Sasu, params),
            eurl: self.simulate(LegalStatus::Eurl, params),
        };
        debug!(
            best = %comparison.best_status(),
            annual_difference = %comparison.annual_difference(),
            "Comparison complete"
        );
        comparison
    }

    /// Marginal income tax rate for `taxable_income` and `fiscal_shares`.
    ///
    /// `fiscal_shares` is clamped to `[0.5, 6.0]`, the range accepted by
    /// [`SimulationParameters`].
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
        fiscal_shares: Decimal,
    ) -> Decimal {
        let fiscal_shares = fiscal_shares.clamp(MIN_FISCAL_SHARES, MAX_FISCAL_SHARES);
        IncomeTaxSchedule::new(&self.rates.income_tax_brackets)
            .marginal_rate(taxable_income, fiscal_shares)
    }

    pub fn simulate_profile(
        &self,
        profile: &StatusProfile,
        params: &SimulationParameters,
    ) -> SimulationResult {
        let revenue = params.annual_revenue();
        let profit_before_compensation = params.gross_profit();

        // Stage 1: compensation
        let compensation = resolve_compensation(
            params.annual_target_net_compensation(),
            profile.compensation_multiplier,
            profit_before_compensation,
        );
        let profit_after_compensation =
            non_negative(profit_before_compensation - compensation.total_cost);
        let gross_compensation = profile
            .gross_display
            .estimate(compensation.net_compensation, compensation.social_contributions);

        // Stage 2: corporate tax
        let corporate_tax =
            CorporateTax::from_rates(self.rates).calculate(profit_after_compensation);
        let post_tax_result = non_negative(profit_after_compensation - corporate_tax);
        debug!(
            status = %profile.status,
            profit_after_compensation = %profit_after_compensation,
            corporate_tax = %corporate_tax,
            post_tax_result = %post_tax_result,
            "Corporate tax computed"
        );

        // Stage 3: dividends
        let dividends = if params.distribute_dividends() && post_tax_result > Decimal::ZERO {
            distribute(
                post_tax_result,
                profile.dividend_rule,
                DividendTaxation::from_rates(self.rates, params.use_progressive_tax()),
            )
        } else {
            DividendBreakdown::NONE
        };

        // Stage 4: personal income tax
        let taxable_compensation = compensation.net_compensation
            - self.professional_expense_deduction(compensation.net_compensation);
        let taxable_income = taxable_compensation + dividends.taxable_income;
        let income_tax = IncomeTaxSchedule::new(&self.rates.income_tax_brackets)
            .calculate(taxable_income, params.fiscal_shares());
        debug!(
            status = %profile.status,
            taxable_income = %taxable_income,
            fiscal_shares = %params.fiscal_shares(),
            income_tax = %income_tax,
            "Income tax computed"
        );

        // Stage 5: disposable income
        let disposable_income =
            compensation.net_compensation + dividends.net_dividends - income_tax;
        let total_levies = compensation.social_contributions
            + corporate_tax
            + dividends.social_contributions
            + dividends.tax
            + income_tax;
        let overall_levy_rate = if revenue > Decimal::ZERO {
            total_levies / revenue
        } else {
            warn!(status = %profile.status, "Zero revenue; overall levy rate set to 0");
            Decimal::ZERO
        };
        debug!(
            status = %profile.status,
            disposable_income = %disposable_income,
            overall_levy_rate = %overall_levy_rate,
            "Simulation complete"
        );

        SimulationResult {
            status: profile.status,
            revenue,
            operating_expenses: params.operating_expenses(),
            profit_before_compensation,
            gross_compensation,
            social_contributions: compensation.social_contributions,
            net_compensation: compensation.net_compensation,
            profit_after_compensation,
            corporate_tax,
            post_tax_result,
            gross_dividends: dividends.gross_dividends,
            dividend_social_contributions: dividends.social_contributions,
            dividend_tax: dividends.tax,
            net_dividends: dividends.net_dividends,
            taxable_income,
            income_tax,
            disposable_income,
            overall_levy_rate,
        }
    }

    /// Flat-rate professional expense deduction on net compensation, capped.
    fn professional_expense_deduction(
        &self,
        net_compensation: Decimal,
    ) -> Decimal {
        (net_compensation * self.rates.professional_expense_deduction_rate)
            .min(self.rates.professional_expense_deduction_cap)
    }
}
