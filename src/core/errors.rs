//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

use crate::model::ModelError;

/// Main error type for iosplint operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Program model is structurally invalid
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::file_system("Cannot read model", "model.json", io);
        assert_eq!(err.to_string(), "File system error: Cannot read model");
        assert!(std::error::Error::source(&err).is_some());
    }
}
