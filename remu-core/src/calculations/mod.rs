//! Calculation stages of the remuneration pipeline.
//!
//! Each stage is a pure function of its inputs and a [`TaxRates`](crate::TaxRates)
//! table. [`Simulator`] chains them for a given legal status.

pub mod common;
pub mod compensation;
pub mod corporate_tax;
pub mod dividends;
pub mod income_tax;
pub mod simulation;

pub use compensation::{CompensationBreakdown, resolve_compensation};
pub use corporate_tax::CorporateTax;
pub use dividends::{DividendBreakdown, DividendContributionRule, DividendTaxation, distribute};
pub use income_tax::IncomeTaxSchedule;
pub use simulation::{GrossCompensationDisplay, Simulator, StatusProfile};
