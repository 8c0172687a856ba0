use thiserror::Error;

#[derive(Error, Debug)]
pub enum CdsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    StatusError { status: u16, url: String },

    #[error("School not found: {id}")]
    NotFound { id: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl CdsError {
    /// Whether the error came from talking to the API, as opposed to local setup.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CdsError::ApiError(_)
                | CdsError::StatusError { .. }
                | CdsError::NotFound { .. }
                | CdsError::SerializationError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CdsError::ApiError(_) | CdsError::StatusError { .. } => {
                "Could not reach the Common Data Set API".to_string()
            }
            CdsError::NotFound { id } => format!("No institution with id '{}'", id),
            CdsError::ConfigError { message } => format!("Configuration problem: {}", message),
            CdsError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CdsError>;
