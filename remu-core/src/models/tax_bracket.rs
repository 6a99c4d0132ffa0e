use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// One bracket of a progressive schedule.
///
/// `upper_threshold` is the inclusive upper bound of the bracket; `None`
/// marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_threshold: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bounded bracket, validating the threshold and rate.
    pub fn bounded(
        upper_threshold: Decimal,
        rate: Decimal,
    ) -> Result<Self, ValidationError> {
        let bracket = Self {
            upper_threshold: Some(upper_threshold),
            rate,
        };
        bracket.validate()?;
        Ok(bracket)
    }

    /// Creates the unbounded top bracket.
    pub fn unbounded(rate: Decimal) -> Result<Self, ValidationError> {
        let bracket = Self {
            upper_threshold: None,
            rate,
        };
        bracket.validate()?;
        Ok(bracket)
    }

    /// Rate in `[0, 1]`, finite threshold non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::rate_within("income tax bracket rate", self.rate, Decimal::ZERO, Decimal::ONE)?;
        if let Some(threshold) = self.upper_threshold {
            validation::non_negative_amount("income tax bracket threshold", threshold)?;
        }
        Ok(())
    }

    /// Whether `per_share_income` falls at or below this bracket's ceiling.
    pub fn contains(
        &self,
        per_share_income: Decimal,
    ) -> bool {
        self.upper_threshold
            .is_none_or(|threshold| per_share_income <= threshold)
    }
}
