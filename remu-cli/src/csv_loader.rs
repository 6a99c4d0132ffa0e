//! CSV loader for batches of simulation scenarios.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive and must match exactly.
//!
//! | Column                            | Required | Type    | Notes                          |
//! |-----------------------------------|----------|---------|--------------------------------|
//! | `annual_revenue`                  | yes      | decimal | excluding VAT                  |
//! | `operating_expenses`              | yes      | decimal |                                |
//! | `target_monthly_net_compensation` | yes      | decimal | per month                      |
//! | `distribute_dividends`            | yes      | bool    | `true` / `false`               |
//! | `fiscal_shares`                   | yes      | decimal | 0.5 to 6.0                     |
//! | `use_progressive_tax`             | yes      | bool    | `true` / `false`               |
//! | `share_capital`                   | no       | decimal | empty or absent means 1000     |
//! | `label`                           | no       | string  | shown in the batch report      |
//!
//! ### Minimal example
//!
//! ```csv
//! annual_revenue,operating_expenses,target_monthly_net_compensation,distribute_dividends,fiscal_shares,use_progressive_tax
//! 100000,10000,4000,true,1,false
//! ```
use remu_core::{SimulationInput, SimulationParameters, ValidationError};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    annual_revenue: Decimal,
    operating_expenses: Decimal,
    target_monthly_net_compensation: Decimal,
    distribute_dividends: bool,
    fiscal_shares: Decimal,
    use_progressive_tax: bool,
    share_capital: Option<Decimal>,
    label: Option<String>,
}

/// One validated scenario read from a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// 1-based data row number (header = row 0).
    pub row: usize,
    pub label: Option<String>,
    pub params: SimulationParameters,
}

impl Scenario {
    /// The label when present, otherwise `row N`.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("row {}", self.row),
        }
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row was well formed but its values break a parameter rule.
    #[error("invalid scenario on row {row}: {source}")]
    InvalidScenario {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, CsvLoadError> {
    let defaults = SimulationInput::default();
    let input = SimulationInput {
        annual_revenue: row.annual_revenue,
        operating_expenses: row.operating_expenses,
        target_monthly_net_compensation: row.target_monthly_net_compensation,
        distribute_dividends: row.distribute_dividends,
        fiscal_shares: row.fiscal_shares,
        use_progressive_tax: row.use_progressive_tax,
        share_capital: row.share_capital.unwrap_or(defaults.share_capital),
    };

    let params = SimulationParameters::new(input).map_err(|source| {
        CsvLoadError::InvalidScenario {
            row: row_number,
            source,
        }
    })?;

    Ok(Scenario {
        row: row_number,
        label: row.label,
        params,
    })
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::InvalidScenario] – if a row fails parameter validation.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Vec<Scenario>> {
    use anyhow::Context;

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read scenario file '{}'", path.display()))?;
    let scenarios = load_from_str(&contents)
        .with_context(|| format!("invalid scenario file '{}'", path.display()))?;
    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
