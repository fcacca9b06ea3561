//! Error types for parentmap.
//!
//! Only the I/O edges of the crate fail: configuration loading and reading or
//! writing venue datasets. Image resolution and rendering never return errors;
//! they degrade to placeholders instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for parentmap operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Dataset Errors ===
    /// A dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    DatasetRead {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A dataset file was not valid venue JSON.
    #[error("failed to parse dataset {path}: {source}")]
    DatasetParse {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// No venue with the requested id exists in the catalog.
    #[error("venue not found: {id}")]
    VenueNotFound {
        /// The id that was looked up.
        id: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for parentmap operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a venue-not-found error.
    #[must_use]
    pub fn venue_not_found(id: impl Into<String>) -> Self {
        Self::VenueNotFound { id: id.into() }
    }

    /// Check if this error is a missing venue lookup.
    #[must_use]
    pub fn is_venue_not_found(&self) -> bool {
        matches!(self, Self::VenueNotFound { .. })
    }

    /// Check if this error came from a dataset file.
    #[must_use]
    pub fn is_dataset_error(&self) -> bool {
        matches!(self, Self::DatasetRead { .. } | Self::DatasetParse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::venue_not_found("042");
        assert_eq!(err.to_string(), "venue not found: 042");
    }

    #[test]
    fn test_is_venue_not_found() {
        assert!(Error::venue_not_found("x").is_venue_not_found());
        assert!(!Error::config_validation("x").is_venue_not_found());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("preload_limit too large");
        assert!(err.to_string().contains("preload_limit too large"));
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_dataset_read_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::DatasetRead {
            path: PathBuf::from("/data/locations.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/locations.json"));
        assert!(msg.contains("no such file"));
        assert!(err.is_dataset_error());
    }

    #[test]
    fn test_dataset_parse_error_display() {
        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err = Error::DatasetParse {
            path: PathBuf::from("broken.json"),
            source: json_err,
        };
        assert!(err.to_string().contains("broken.json"));
        assert!(err.is_dataset_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_dataset_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
