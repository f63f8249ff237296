use thiserror::Error;

#[derive(Debug, Error)]
pub enum DcHealthError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid revenue profile: {0}")]
    InvalidProfile(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DcHealthError {
    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        DcHealthError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DcHealthError {
    fn from(e: serde_json::Error) -> Self {
        DcHealthError::SerializationError(e.to_string())
    }
}
