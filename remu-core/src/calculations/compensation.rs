//! Compensation affordability.
//!
//! The company pays the manager's net compensation plus social contributions
//! expressed as a multiple `m` of the net. When the available profit cannot
//! cover `target × (1 + m)`, the whole profit becomes the total cost and the
//! net compensation is scaled down to `profit / (1 + m)`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use remu_core::calculations::resolve_compensation;
//!
//! let affordable = resolve_compensation(dec!(48000), dec!(0.82), dec!(90000));
//! assert_eq!(affordable.net_compensation, dec!(48000));
//! assert_eq!(affordable.social_contributions, dec!(39360));
//! assert_eq!(affordable.total_cost, dec!(87360));
//! assert!(!affordable.clamped);
//!
//! let clamped = resolve_compensation(dec!(35000), dec!(0.82), dec!(40000));
//! assert_eq!(clamped.net_compensation.round_dp(2), dec!(21978.02));
//! assert_eq!(clamped.social_contributions.round_dp(2), dec!(18021.98));
//! assert_eq!(clamped.total_cost, dec!(40000));
//! assert!(clamped.clamped);
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Decimal places kept on a clamped net compensation.
///
/// Truncated toward zero so that `net × (1 + m)` stays within the profit and
/// `profit − net` is exact.
pub const CLAMPED_NET_SCALE: u32 = 12;

/// Outcome of the compensation stage.
///
/// `net_compensation + social_contributions == total_cost` always holds, and
/// `total_cost` never exceeds the available profit (or is zero when nothing
/// is available).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    pub net_compensation: Decimal,
    pub social_contributions: Decimal,
    pub total_cost: Decimal,

    /// The target could not be paid in full.
    pub clamped: bool,
}

impl CompensationBreakdown {
    fn nothing(target: Decimal) -> Self {
        Self {
            net_compensation: Decimal::ZERO,
            social_contributions: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            clamped: target > Decimal::ZERO,
        }
    }
}

/// Converts a target net compensation into what the company can afford.
///
/// * `target` - annual net compensation wanted by the manager
/// * `contribution_multiplier` - contributions as a share of net pay
/// * `available_profit` - profit before compensation
pub fn resolve_compensation(
    target: Decimal,
    contribution_multiplier: Decimal,
    available_profit: Decimal,
) -> CompensationBreakdown {
    if available_profit <= Decimal::ZERO {
        if target > Decimal::ZERO {
            warn!(
                target = %target,
                available_profit = %available_profit,
                "No profit available; compensation forced to zero"
            );
        }
        return CompensationBreakdown::nothing(target);
    }

    let cost_factor = Decimal::ONE + contribution_multiplier;
    let full_cost = target * cost_factor;

    if full_cost > available_profit {
        let net_compensation = (available_profit / cost_factor)
            .round_dp_with_strategy(CLAMPED_NET_SCALE, RoundingStrategy::ToZero);
        let social_contributions = available_profit - net_compensation;
        warn!(
            target = %target,
            full_cost = %full_cost,
            available_profit = %available_profit,
            net_compensation = %net_compensation,
            "Target compensation exceeds available profit; clamping to profit"
        );
        return CompensationBreakdown {
            net_compensation,
            social_contributions,
            total_cost: available_profit,
            clamped: true,
        };
    }

    let social_contributions = target * contribution_multiplier;
    let total_cost = target + social_contributions;
    debug!(
        net_compensation = %target,
        social_contributions = %social_contributions,
        total_cost = %total_cost,
        "Target compensation affordable"
    );

    CompensationBreakdown {
        net_compensation: target,
        social_contributions,
        total_cost,
        clamped: false,
    }
}
