//! Plain-text and JSON rendering of simulation results.

use std::fmt::Write;

use remu_core::{ComparisonResult, SimulationResult, TaxRates};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const LABEL_WIDTH: usize = 34;
const VALUE_WIDTH: usize = 14;

const GROSS_FOOTNOTE: &str = "\
Gross compensation is a display estimate, not a payroll figure.
Contribution rates are flat approximations; check your situation with an accountant.";

/// One line of the recap table.
struct Row {
    label: &'static str,
    value: fn(&SimulationResult) -> String,
}

const RECAP_ROWS: &[Row] = &[
    Row {
        label: "Revenue (excl. VAT)",
        value: |r| format_eur(r.revenue),
    },
    Row {
        label: "Operating expenses",
        value: |r| format_eur(r.operating_expenses),
    },
    Row {
        label: "Gross compensation (approx.)",
        value: |r| format_eur(r.gross_compensation),
    },
    Row {
        label: "Net compensation",
        value: |r| format_eur(r.net_compensation),
    },
    Row {
        label: "Social contributions (compensation)",
        value: |r| format_eur(r.social_contributions),
    },
    Row {
        label: "Social contributions (dividends)",
        value: |r| format_eur(r.dividend_social_contributions),
    },
    Row {
        label: "Corporate tax",
        value: |r| format_eur(r.corporate_tax),
    },
    Row {
        label: "Gross dividends",
        value: |r| format_eur(r.gross_dividends),
    },
    Row {
        label: "Dividend tax",
        value: |r| format_eur(r.dividend_tax),
    },
    Row {
        label: "Net dividends",
        value: |r| format_eur(r.net_dividends),
    },
    Row {
        label: "Income tax",
        value: |r| format_eur(r.income_tax),
    },
    Row {
        label: "Disposable income",
        value: |r| format_eur(r.disposable_income),
    },
    Row {
        label: "Monthly net",
        value: |r| format_eur(r.monthly_disposable_income()),
    },
    Row {
        label: "Overall levy rate",
        value: |r| format_percent(r.overall_levy_rate),
    },
];

/// Whole euros with a space as thousands separator.
///
/// ```
/// use rust_decimal_macros::dec;
/// use remu_cli::report::format_eur;
///
/// assert_eq!(format_eur(dec!(43324.57)), "43 325 €");
/// assert_eq!(format_eur(dec!(-1570.5)), "-1 571 €");
/// ```
pub fn format_eur(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped} €")
}

/// A fraction as a percentage with one decimal, e.g. `46.7%`.
pub fn format_percent(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.1}%")
}

/// Recap table for a single status.
pub fn render_result(result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<LABEL_WIDTH$} {:>VALUE_WIDTH$}", "", result.status.as_str());
    for row in RECAP_ROWS {
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$} {:>VALUE_WIDTH$}",
            row.label,
            (row.value)(result)
        );
    }
    let _ = writeln!(out);
    out.push_str(GROSS_FOOTNOTE);
    out.push('\n');
    out
}

/// Side-by-side recap of both statuses and the recommendation.
pub fn render_comparison(comparison: &ComparisonResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$}",
        "",
        comparison.sasu.status.as_str(),
        comparison.eurl.status.as_str()
    );
    for row in RECAP_ROWS {
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$}",
            row.label,
            (row.value)(&comparison.sasu),
            (row.value)(&comparison.eurl)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "With these parameters {} leaves {} more per year ({} per month).",
        comparison.best_status().label(),
        format_eur(comparison.annual_difference()),
        format_eur(comparison.monthly_difference())
    );
    let _ = writeln!(out);
    out.push_str(GROSS_FOOTNOTE);
    out.push('\n');
    out
}

/// Fiscal data of one year.
pub fn render_rates(rates: &TaxRates) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Fiscal year {}", rates.year);
    let _ = writeln!(out);
    let _ = writeln!(out, "Income tax brackets (per fiscal share)");

    let mut lower = Decimal::ZERO;
    for bracket in &rates.income_tax_brackets {
        let range = match bracket.upper_threshold {
            Some(upper) => format!("{} to {}", format_eur(lower), format_eur(upper)),
            None => format!("above {}", format_eur(lower)),
        };
        let _ = writeln!(out, "  {:<30} {:>8}", range, format_percent(bracket.rate));
        if let Some(upper) = bracket.upper_threshold {
            lower = upper;
        }
    }

    let lines: [(&str, String); 12] = [
        ("Corporate tax, reduced rate", format_percent(rates.corporate_tax_reduced_rate)),
        ("Corporate tax, reduced rate ceiling", format_eur(rates.corporate_tax_threshold)),
        ("Corporate tax, normal rate", format_percent(rates.corporate_tax_normal_rate)),
        ("Flat tax on dividends", format_percent(rates.flat_tax_rate)),
        ("Social levies on dividends", format_percent(rates.social_levy_rate)),
        ("Dividend allowance (progressive)", format_percent(rates.dividend_allowance_rate)),
        ("SASU contributions (of net)", format_percent(rates.sasu_social_charges_rate)),
        ("EURL contributions (of net)", format_percent(rates.eurl_tns_social_charges_rate)),
        ("EURL dividend contributions", format_percent(rates.eurl_dividend_social_charges_rate)),
        (
            "EURL dividend threshold (of capital)",
            format_percent(rates.eurl_dividend_capital_threshold_rate),
        ),
        (
            "Professional expense deduction",
            format_percent(rates.professional_expense_deduction_rate),
        ),
        (
            "Professional expense deduction cap",
            format_eur(rates.professional_expense_deduction_cap),
        ),
    ];

    let _ = writeln!(out);
    for (label, value) in lines {
        let _ = writeln!(out, "{label:<LABEL_WIDTH$} {value:>VALUE_WIDTH$}");
    }
    out
}

/// Pretty-printed JSON of any report structure.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
