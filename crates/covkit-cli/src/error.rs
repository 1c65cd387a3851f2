//! Error types for the CLI

use covkit::ThresholdViolation;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Covkit library error
    #[error("Coverage error: {0}")]
    Coverage(#[from] covkit::CoverageError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Report generation error
    #[error("Report generation failed: {message}")]
    ReportGeneration {
        /// Error message
        message: String,
    },

    /// One or more categories fell below their threshold
    #[error("Coverage below threshold: {}", summarize_violations(.violations))]
    ThresholdFailed {
        /// Failed categories
        violations: Vec<ThresholdViolation>,
    },
}

fn summarize_violations(violations: &[ThresholdViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a report generation error
    #[must_use]
    pub fn report_generation(message: impl Into<String>) -> Self {
        Self::ReportGeneration {
            message: message.into(),
        }
    }

    /// Create a threshold failure
    #[must_use]
    pub fn threshold_failed(violations: Vec<ThresholdViolation>) -> Self {
        Self::ThresholdFailed { violations }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("no input files");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_report_generation_error() {
        let err = CliError::report_generation("disk full");
        assert!(err.to_string().contains("Report generation failed"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "coverage.json");
        let err: CliError = io.into();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_from_coverage_error() {
        let err: CliError = covkit::CoverageError::missing_field("a.js", "fnMap").into();
        assert!(matches!(err, CliError::Coverage(_)));
        assert!(err.to_string().contains("fnMap"));
    }

    #[test]
    fn test_threshold_failed_lists_categories() {
        let err = CliError::threshold_failed(vec![
            ThresholdViolation {
                category: "lines",
                required: 80.0,
                actual: 50.0,
            },
            ThresholdViolation {
                category: "branches",
                required: 60.0,
                actual: 25.0,
            },
        ]);
        let message = err.to_string();
        assert!(message.contains("lines coverage 50.00%"));
        assert!(message.contains("branches coverage 25.00%"));
    }
}
