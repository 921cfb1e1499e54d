//! Error types for SonarQube API operations.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur during SonarQube API operations.
#[derive(Debug, Error)]
pub enum SonarError {
    /// Configuration is missing or incomplete.
    #[error("SonarQube configuration required: {0}")]
    ConfigMissing(String),

    /// Caller-supplied options failed validation. No request was sent.
    #[error("invalid request options: {0}")]
    Validation(#[from] ValidationError),

    /// API request failed with a non-2xx status.
    #[error("SonarQube API error (HTTP {status}): {}", .messages.join("; "))]
    ApiError {
        status: u16,
        messages: Vec<String>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl SonarError {
    /// The HTTP status code of a failed API call, if this is an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            SonarError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, SonarError::Validation(_))
    }
}

/// Result type alias for SonarQube operations.
pub type Result<T> = core::result::Result<T, SonarError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{ValidationError, ValidationErrorKind};

    #[test]
    fn test_api_error_display_joins_messages() {
        let err = SonarError::ApiError {
            status: 500,
            messages: vec!["boom".to_string(), "again".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("boom; again"));
    }

    #[test]
    fn test_validation_error_is_distinguishable_by_variant() {
        let err: SonarError = ValidationError::new(
            "name",
            ValidationErrorKind::MissingRequired,
            "is required",
        )
        .into();
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
    }
}
