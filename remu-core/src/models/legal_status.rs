use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::SimulationParameters;
use crate::validation::ValidationError;

/// Recommended minimum share capital for an EURL.
pub const EURL_MIN_SHARE_CAPITAL: Decimal = dec!(100);

/// Legal structure of the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegalStatus {
    /// Single-shareholder simplified joint-stock company. The manager is an
    /// assimilated employee.
    Sasu,
    /// Single-member limited-liability company taxed at corporate tax. The
    /// manager is self-employed (TNS).
    Eurl,
}

impl LegalStatus {
    pub const ALL: [LegalStatus; 2] = [LegalStatus::Sasu, LegalStatus::Eurl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sasu => "SASU",
            Self::Eurl => "EURL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sasu => "SASU (assimilated employee)",
            Self::Eurl => "EURL at IS (self-employed)",
        }
    }

    /// Parses a status name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SASU" => Some(Self::Sasu),
            "EURL" => Some(Self::Eurl),
            _ => None,
        }
    }
}

impl fmt::Display for LegalStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// Status-specific checks applied on demand, after the parameter bundle has
/// been built.
///
/// SASU has no extra constraint. EURL requires the recommended minimum share
/// capital.
pub fn validate_for_status(
    status: LegalStatus,
    params: &SimulationParameters,
) -> Result<(), ValidationError> {
    match status {
        LegalStatus::Sasu => Ok(()),
        LegalStatus::Eurl => {
            if params.share_capital() < EURL_MIN_SHARE_CAPITAL {
                return Err(ValidationError::ShareCapitalTooLow {
                    capital: params.share_capital(),
                    minimum: EURL_MIN_SHARE_CAPITAL,
                });
            }
            Ok(())
        }
    }
}
