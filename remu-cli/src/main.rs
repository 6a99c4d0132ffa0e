use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use remu_core::{
    ComparisonResult, LegalStatus, SimulationInput, SimulationParameters, Simulator, TaxRates,
    validate_for_status,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use remu_cli::{csv_loader, logging, report};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares the net income left to a solo entrepreneur under SASU and EURL.
///
/// Figures use the compiled-in fiscal data of the requested year and flat
/// approximations of social contribution rates.
#[derive(Debug, Parser)]
#[command(name = "remu", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    /// RUST_LOG overrides this when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Fiscal year whose rates are applied.
    #[arg(long, default_value_t = 2024, global = true)]
    year: i32,

    /// Output format of the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate both statuses and recommend one.
    Compare(ScenarioArgs),

    /// Simulate a single status.
    Simulate {
        /// SASU or EURL.
        #[arg(long)]
        status: LegalStatus,

        #[command(flatten)]
        scenario: ScenarioArgs,
    },

    /// Compare every scenario of a CSV file.
    Batch {
        /// Path to the scenario CSV file.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the fiscal data of the selected year.
    Rates,
}

#[derive(Debug, Args)]
struct ScenarioArgs {
    /// Annual revenue, excluding VAT.
    #[arg(long, default_value = "100000")]
    revenue: Decimal,

    /// Annual operating expenses.
    #[arg(long, default_value = "10000")]
    expenses: Decimal,

    /// Target net compensation per month.
    #[arg(long, default_value = "4000")]
    monthly_net: Decimal,

    /// Keep the corporate result in the company instead of paying dividends.
    #[arg(long)]
    no_dividends: bool,

    /// Tax dividends with the progressive schedule instead of the flat tax.
    #[arg(long)]
    progressive: bool,

    /// Number of fiscal shares of the household.
    #[arg(long, default_value = "1.0")]
    shares: Decimal,

    /// Share capital of the company.
    #[arg(long, default_value = "1000")]
    capital: Decimal,
}

impl ScenarioArgs {
    fn into_parameters(self) -> Result<SimulationParameters> {
        let input = SimulationInput {
            annual_revenue: self.revenue,
            operating_expenses: self.expenses,
            target_monthly_net_compensation: self.monthly_net,
            distribute_dividends: !self.no_dividends,
            fiscal_shares: self.shares,
            use_progressive_tax: self.progressive,
            share_capital: self.capital,
        };
        SimulationParameters::new(input).context("invalid simulation parameters")
    }
}

#[derive(Debug, Serialize)]
struct BatchEntry {
    row: usize,
    name: String,
    comparison: ComparisonResult,
}

// ─── commands ────────────────────────────────────────────────────────────────

/// Runs the on-demand status rule. A failure is only a recommendation.
fn check_status(
    status: LegalStatus,
    params: &SimulationParameters,
) {
    if let Err(error) = validate_for_status(status, params) {
        warn!(%status, %error, "Status recommendation not met; simulating anyway");
    }
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text(value)),
        OutputFormat::Json => {
            println!("{}", report::to_json(value).context("failed to serialize report")?)
        }
    }
    Ok(())
}

fn run_compare(
    simulator: &Simulator<'_>,
    scenario: ScenarioArgs,
    format: OutputFormat,
) -> Result<()> {
    let params = scenario.into_parameters()?;
    for status in LegalStatus::ALL {
        check_status(status, &params);
    }

    let comparison = simulator.compare(&params);
    info!(best = %comparison.best_status(), "Comparison complete");
    emit(format, &comparison, report::render_comparison)
}

fn run_simulate(
    simulator: &Simulator<'_>,
    status: LegalStatus,
    scenario: ScenarioArgs,
    format: OutputFormat,
) -> Result<()> {
    let params = scenario.into_parameters()?;
    check_status(status, &params);

    let result = simulator.simulate(status, &params);
    emit(format, &result, report::render_result)
}

fn run_batch(
    simulator: &Simulator<'_>,
    file: &std::path::Path,
    format: OutputFormat,
) -> Result<()> {
    let scenarios = csv_loader::load_from_file(file)?;
    info!(count = scenarios.len(), file = %file.display(), "Loaded scenarios");

    let entries: Vec<BatchEntry> = scenarios
        .into_iter()
        .map(|scenario| {
            debug!(row = scenario.row, name = %scenario.display_name(), "Simulating scenario");
            for status in LegalStatus::ALL {
                check_status(status, &scenario.params);
            }
            BatchEntry {
                row: scenario.row,
                name: scenario.display_name(),
                comparison: simulator.compare(&scenario.params),
            }
        })
        .collect();

    emit(format, &entries, |entries| {
        entries
            .iter()
            .map(|entry| {
                format!(
                    "== {} ==\n{}",
                    entry.name,
                    report::render_comparison(&entry.comparison)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let rates = TaxRates::for_year(cli.year)
        .with_context(|| format!("no fiscal data for year {}", cli.year))?;
    let simulator = Simulator::new(&rates).context("fiscal data is inconsistent")?;
    debug!(year = cli.year, "Fiscal data loaded");

    match cli.command {
        Command::Compare(scenario) => run_compare(&simulator, scenario, cli.format),
        Command::Simulate { status, scenario } => {
            run_simulate(&simulator, status, scenario, cli.format)
        }
        Command::Batch { file } => run_batch(&simulator, &file, cli.format),
        Command::Rates => emit(cli.format, &rates, report::render_rates),
    }
}
