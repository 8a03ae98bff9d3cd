//! Common error types used throughout schooldir.
//!
//! The variants map onto the three failure classes callers care about:
//! rejected input, storage failures, and image write failures.

use std::path::PathBuf;

use crate::validation::ValidationErrors;

/// Common error type for schooldir.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more submitted fields are missing or malformed.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The request itself could not be understood.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Writing an uploaded image to disk failed.
    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new ImageWrite error for the given target path.
    pub fn image_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ImageWrite {
            path: path.into(),
            source,
        }
    }

    /// HTTP status code this error should be reported with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) => 400,
            Self::Database(_) | Self::ImageWrite { .. } => 500,
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::Database(_) => "database_error",
            Self::ImageWrite { .. } => "image_write_error",
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
