//! Corporate tax (IS) on the profit left after compensation.
//!
//! Two brackets: a reduced rate up to a profit threshold, the normal rate on
//! the part above it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use remu_core::calculations::CorporateTax;
//!
//! let is = CorporateTax {
//!     reduced_rate: dec!(0.15),
//!     normal_rate: dec!(0.25),
//!     threshold: dec!(42500),
//! };
//!
//! assert_eq!(is.calculate(dec!(42500)), dec!(6375));
//! assert_eq!(is.calculate(dec!(100000)), dec!(20750));
//! assert_eq!(is.calculate(dec!(-500)), dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxRates;

/// Two-bracket corporate tax schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTax {
    pub reduced_rate: Decimal,
    pub normal_rate: Decimal,

    /// Inclusive ceiling of the reduced-rate bracket.
    pub threshold: Decimal,
}

impl CorporateTax {
    pub fn from_rates(rates: &TaxRates) -> Self {
        Self {
            reduced_rate: rates.corporate_tax_reduced_rate,
            normal_rate: rates.corporate_tax_normal_rate,
            threshold: rates.corporate_tax_threshold,
        }
    }

    /// Corporate tax due on `profit`. Zero for a loss.
    pub fn calculate(
        &self,
        profit: Decimal,
    ) -> Decimal {
        if profit <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        if profit <= self.threshold {
            profit * self.reduced_rate
        } else {
            self.threshold * self.reduced_rate + (profit - self.threshold) * self.normal_rate
        }
    }
}
