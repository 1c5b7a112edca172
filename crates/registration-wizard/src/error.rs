//! Error types for the registration wizard.

use auth_client::AuthError;
use thiserror::Error;

/// Wizard error types.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("No country selected")]
    MissingCountrySelection,

    #[error("Country not found: {0}")]
    CountryNotFound(String),

    #[error("A registration request is already in flight")]
    SubmissionInFlight,

    #[error("Registration failed: {0}")]
    Registration(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid reference data: {0}")]
    ReferenceData(String),
}

/// Result type alias for wizard operations.
pub type WizardResult<T> = Result<T, WizardError>;

impl From<std::io::Error> for WizardError {
    fn from(e: std::io::Error) -> Self {
        WizardError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(e: serde_json::Error) -> Self {
        WizardError::Storage(format!("JSON serialization error: {}", e))
    }
}
