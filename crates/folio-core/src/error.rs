//! Error types for Folio

use thiserror::Error;

/// Result type alias using Folio's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Folio error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Project '{0}' not found. The project list may have changed; reload it and try again.")]
    ProjectNotFound(String),

    // Input errors (E800-E899)
    #[error("Invalid date '{0}': expected {1}")]
    InvalidDate(String, &'static str),

    #[error("Validation error for '{field}': {message}")]
    Validation { field: String, message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error for a named form field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "E001",
            Self::InvalidDate(..) => "E800",
            Self::Validation { .. } => "E801",
            Self::Other(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ProjectNotFound(_) => Some("Go back to the project list at /".to_string()),
            Self::InvalidDate(_, expected) => Some(format!("Enter the date as {}", expected)),
            Self::Validation { field, .. } => Some(format!("Check the '{}' field", field)),
            _ => None,
        }
    }

    /// Whether this error was caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound(_) | Self::InvalidDate(..) | Self::Validation { .. }
        )
    }
}
