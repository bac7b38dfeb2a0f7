//! Custom error types for Tally
//!
//! Bad financial data never produces an error: amounts degrade to zero,
//! unparsable dates drop the transaction, and short histories yield empty
//! forecasts. The variants below cover programmer errors caught at the call
//! boundary and the I/O of the CLI shell.

use thiserror::Error;

/// The main error type for Tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Invalid arguments passed to the engine (wrong algorithm key, bad window, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Snapshot input could not be understood
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl TallyError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for TallyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for Tally operations
pub type TallyResult<T> = Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TallyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error() {
        let err = TallyError::Validation("unknown algorithm 'magic'".into());
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: unknown algorithm 'magic'"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tally_err: TallyError = io_err.into();
        assert!(matches!(tally_err, TallyError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let tally_err: TallyError = json_err.into();
        assert!(matches!(tally_err, TallyError::Json(_)));
    }
}
