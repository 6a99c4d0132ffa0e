mod legal_status;
mod simulation_parameters;
mod simulation_result;
mod tax_bracket;
mod tax_rates;

pub use legal_status::{EURL_MIN_SHARE_CAPITAL, LegalStatus, validate_for_status};
pub use simulation_parameters::{SimulationInput, SimulationParameters};
pub use simulation_result::{ComparisonResult, SimulationResult};
pub use tax_bracket::TaxBracket;
pub use tax_rates::{PLAUSIBLE_YEARS, TaxRates};
