use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::MONTHS_PER_YEAR;
use crate::validation::{self, ValidationError};
use crate::{LegalStatus, validate_for_status};

/// Raw simulation inputs, as typed by a user or read from a file.
///
/// Nothing is checked here; convert into [`SimulationParameters`] to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    /// Annual revenue, excluding VAT.
    pub annual_revenue: Decimal,

    /// Annual operating expenses (rent, equipment, subcontracting...).
    pub operating_expenses: Decimal,

    /// Target net compensation per month.
    pub target_monthly_net_compensation: Decimal,

    /// Distribute the remaining corporate result as dividends.
    pub distribute_dividends: bool,

    /// Family-quotient divisor for personal income tax.
    pub fiscal_shares: Decimal,

    /// Tax dividends with the progressive schedule instead of the flat tax.
    pub use_progressive_tax: bool,

    /// Share capital, used by the EURL dividend contribution threshold.
    pub share_capital: Decimal,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            annual_revenue: dec!(100000),
            operating_expenses: dec!(10000),
            target_monthly_net_compensation: dec!(4000),
            distribute_dividends: true,
            fiscal_shares: dec!(1.0),
            use_progressive_tax: false,
            share_capital: dec!(1000),
        }
    }
}

/// Validated, immutable simulation parameters.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use remu_core::{SimulationInput, SimulationParameters, ValidationError};
///
/// let params = SimulationParameters::new(SimulationInput {
///     annual_revenue: dec!(100000),
///     operating_expenses: dec!(10000),
///     target_monthly_net_compensation: dec!(4000),
///     ..SimulationInput::default()
/// })
/// .unwrap();
///
/// assert_eq!(params.gross_profit(), dec!(90000));
/// assert_eq!(params.annual_target_net_compensation(), dec!(48000));
///
/// let err = SimulationParameters::new(SimulationInput {
///     operating_expenses: dec!(200000),
///     ..SimulationInput::default()
/// })
/// .unwrap_err();
/// assert!(matches!(err, ValidationError::ExpensesExceedRevenue { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SimulationInput", into = "SimulationInput")]
pub struct SimulationParameters {
    annual_revenue: Decimal,
    operating_expenses: Decimal,
    target_monthly_net_compensation: Decimal,
    distribute_dividends: bool,
    fiscal_shares: Decimal,
    use_progressive_tax: bool,
    share_capital: Decimal,
}

impl SimulationParameters {
    /// Validates `input` and freezes it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if, in this order:
    /// - a monetary value is negative or above
    ///   [`MAX_AMOUNT`](crate::validation::MAX_AMOUNT), or the share capital
    ///   is zero
    /// - the fiscal shares are outside `[0.5, 6.0]`
    /// - the operating expenses exceed the revenue
    /// - the annual target compensation exceeds the revenue
    /// - dividends are requested but revenue minus expenses minus 1.5 times the
    ///   annual target is negative
    pub fn new(input: SimulationInput) -> Result<Self, ValidationError> {
        validation::non_negative_amount("annual revenue", input.annual_revenue)?;
        validation::non_negative_amount("operating expenses", input.operating_expenses)?;
        validation::non_negative_amount(
            "target net compensation",
            input.target_monthly_net_compensation,
        )?;
        validation::positive_amount("share capital", input.share_capital)?;

        validation::fiscal_shares(input.fiscal_shares)?;

        let annual_target = input.target_monthly_net_compensation * MONTHS_PER_YEAR;
        validation::revenue_covers_expenses(input.annual_revenue, input.operating_expenses)?;
        validation::revenue_covers_compensation(annual_target, input.annual_revenue)?;
        validation::dividends_feasible(
            input.annual_revenue,
            input.operating_expenses,
            annual_target,
            input.distribute_dividends,
        )?;

        Ok(Self {
            annual_revenue: input.annual_revenue,
            operating_expenses: input.operating_expenses,
            target_monthly_net_compensation: input.target_monthly_net_compensation,
            distribute_dividends: input.distribute_dividends,
            fiscal_shares: input.fiscal_shares,
            use_progressive_tax: input.use_progressive_tax,
            share_capital: input.share_capital,
        })
    }

    pub fn annual_revenue(&self) -> Decimal {
        self.annual_revenue
    }

    pub fn operating_expenses(&self) -> Decimal {
        self.operating_expenses
    }

    pub fn target_monthly_net_compensation(&self) -> Decimal {
        self.target_monthly_net_compensation
    }

    /// Monthly target times twelve.
    pub fn annual_target_net_compensation(&self) -> Decimal {
        self.target_monthly_net_compensation * MONTHS_PER_YEAR
    }

    pub fn distribute_dividends(&self) -> bool {
        self.distribute_dividends
    }

    pub fn fiscal_shares(&self) -> Decimal {
        self.fiscal_shares
    }

    pub fn use_progressive_tax(&self) -> bool {
        self.use_progressive_tax
    }

    pub fn share_capital(&self) -> Decimal {
        self.share_capital
    }

    /// Revenue minus operating expenses, before any compensation.
    pub fn gross_profit(&self) -> Decimal {
        self.annual_revenue - self.operating_expenses
    }

    /// Runs the status-specific check for a status given by name.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidStatus`] for an unknown name, otherwise
    /// whatever [`validate_for_status`] reports.
    pub fn validate_for_status_name(
        &self,
        status: &str,
    ) -> Result<(), ValidationError> {
        let status: LegalStatus = status.parse()?;
        validate_for_status(status, self)
    }
}

impl TryFrom<SimulationInput> for SimulationParameters {
    type Error = ValidationError;

    fn try_from(input: SimulationInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<SimulationParameters> for SimulationInput {
    fn from(params: SimulationParameters) -> Self {
        Self {
            annual_revenue: params.annual_revenue,
            operating_expenses: params.operating_expenses,
            target_monthly_net_compensation: params.target_monthly_net_compensation,
            distribute_dividends: params.distribute_dividends,
            fiscal_shares: params.fiscal_shares,
            use_progressive_tax: params.use_progressive_tax,
            share_capital: params.share_capital,
        }
    }
}
