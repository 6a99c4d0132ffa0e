pub mod calculations;
pub mod models;
pub mod validation;

pub use calculations::Simulator;
pub use models::*;
pub use validation::ValidationError;
