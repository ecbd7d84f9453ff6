use crate::forms::FieldError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("CMS fetch of {endpoint} failed after {attempts} attempt(s): {message}")]
    Fetch {
        endpoint: String,
        attempts: u32,
        message: String,
    },

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Submission failed: {0}")]
    Submission(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;
