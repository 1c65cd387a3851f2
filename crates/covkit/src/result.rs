//! Result and error types for Covkit.

use thiserror::Error;

/// Result type for Covkit operations
pub type CoverageResult<T> = Result<T, CoverageError>;

/// Errors that can occur in Covkit
#[derive(Debug, Error)]
pub enum CoverageError {
    /// A required key is absent from a file coverage record
    #[error("Missing field `{field}` in coverage for {path}")]
    MissingField {
        /// File the record belongs to
        path: String,
        /// Name of the absent key
        field: String,
    },

    /// Merge operands do not describe the same file shape
    #[error("Shape mismatch in {path}: {category}[{key}] {message}")]
    ShapeMismatch {
        /// File the records belong to
        path: String,
        /// Counter category (`s`, `f` or `b`)
        category: &'static str,
        /// Offending counter key
        key: String,
        /// Error message
        message: String,
    },

    /// Counters and their location maps disagree inside one record
    #[error("Inconsistent coverage record for {path}: {message}")]
    InconsistentRecord {
        /// File the record belongs to
        path: String,
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CoverageError {
    /// Create a missing field error
    #[must_use]
    pub fn missing_field(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.into(),
            field: field.into(),
        }
    }

    /// Create a shape mismatch error
    #[must_use]
    pub fn shape_mismatch(
        path: impl Into<String>,
        category: &'static str,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            path: path.into(),
            category,
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an inconsistent record error
    #[must_use]
    pub fn inconsistent(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InconsistentRecord {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = CoverageError::missing_field("src/a.js", "fnMap");
        assert_eq!(
            err.to_string(),
            "Missing field `fnMap` in coverage for src/a.js"
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = CoverageError::shape_mismatch("src/a.js", "b", "3", "has 2 arms, other has 3");
        assert_eq!(
            err.to_string(),
            "Shape mismatch in src/a.js: b[3] has 2 arms, other has 3"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoverageError = io.into();
        assert!(matches!(err, CoverageError::Io(_)));
    }
}
