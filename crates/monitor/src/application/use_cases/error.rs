use tcm_core::TradeId;
use thiserror::Error;

use crate::application::validation::ValidationErrors;

/// Failures of the trade reporting use cases
#[derive(Debug, Clone, Error)]
pub enum TradeError {
    /// Unknown id, or a trade reported by someone else
    #[error("Trade {0} not found")]
    NotFound(TradeId),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

impl From<ValidationErrors> for TradeError {
    fn from(errors: ValidationErrors) -> Self {
        TradeError::Validation(errors)
    }
}
