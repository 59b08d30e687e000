use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvestorStateError {
    #[error("Missing required parameter in {context}: '{field}'")]
    RequiredFieldMissing { context: String, field: String },

    #[error("Scenario '{scenario}' not found in parameters. Available: {available:?}")]
    ScenarioNotFound {
        scenario: String,
        available: Vec<String>,
    },

    #[error("Vehicle '{vehicle}' not found in fleet. Available: {available:?}")]
    VehicleNotFound {
        vehicle: String,
        available: Vec<String>,
    },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl InvestorStateError {
    pub(crate) fn missing(context: impl Into<String>, field: &str) -> Self {
        InvestorStateError::RequiredFieldMissing {
            context: context.into(),
            field: field.to_string(),
        }
    }
}

impl From<serde_json::Error> for InvestorStateError {
    fn from(e: serde_json::Error) -> Self {
        InvestorStateError::SerializationError(e.to_string())
    }
}
