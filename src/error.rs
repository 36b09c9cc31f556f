//! Error types with actionable diagnostics.
//!
//! Every variant names the problem and, where the user can fix it, a hint on
//! how to do so.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for matheal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the training and export pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Create one with `matheal init` or pass --config")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue { field: String, message: String, suggestion: String },

    /// Input data file does not exist.
    #[error("Training data not found: {path}\n  → Place the CSV at this path or pass --data")]
    DataNotFound { path: PathBuf },

    /// A required column is absent from the CSV header.
    #[error("Column '{column}' missing from {path}\n  → Required columns: {required}")]
    MissingColumn { column: String, path: PathBuf, required: String },

    /// A feature cell could not be parsed as a number.
    #[error("Invalid value '{value}' in column '{column}' at data row {row}\n  → Feature columns must be numeric")]
    InvalidValue { row: usize, column: String, value: String },

    /// The CSV reader rejected the file structure.
    #[error("Malformed CSV in {path}: {message}")]
    Csv { path: PathBuf, message: String },

    /// The input contained a header but no data rows.
    #[error("Dataset {path} contains no data rows")]
    EmptyDataset { path: PathBuf },

    /// Classification needs at least two distinct labels.
    #[error("Found {found} distinct label(s) in '{column}'\n  → At least two risk categories are required to train a classifier")]
    TooFewClasses { column: String, found: usize },

    /// Invalid tensor or matrix shape.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// A lite artifact failed to parse or validate.
    #[error("Invalid lite artifact: {message}\n  → Re-export the model with `matheal train`")]
    Artifact { message: String },

    /// Converted model disagrees with the float model beyond tolerance.
    #[error("Lite model parity check failed: arg-max agreement {agreement:.4} < required {required:.4} on {samples} samples\n  → Try --quantization float16 or none")]
    ParityCheck { agreement: f32, required: f32, samples: usize },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a configuration value error.
    pub fn config_value(
        field: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::ConfigValue {
            field: field.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::ConfigValue { .. }
                | Self::DataNotFound { .. }
                | Self::MissingColumn { .. }
                | Self::InvalidValue { .. }
                | Self::Csv { .. }
                | Self::EmptyDataset { .. }
                | Self::TooFewClasses { .. }
                | Self::ParityCheck { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "E001",
            Self::ConfigParsing { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::DataNotFound { .. } => "E010",
            Self::MissingColumn { .. } => "E011",
            Self::InvalidValue { .. } => "E012",
            Self::Csv { .. } => "E013",
            Self::EmptyDataset { .. } => "E014",
            Self::TooFewClasses { .. } => "E015",
            Self::ShapeMismatch { .. } => "E040",
            Self::Artifact { .. } => "E041",
            Self::ParityCheck { .. } => "E042",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_errors() -> Vec<Error> {
        vec![
            Error::ConfigNotFound { path: "".into() },
            Error::ConfigParsing { path: "".into(), message: "".into() },
            Error::config_value("", "", ""),
            Error::DataNotFound { path: "".into() },
            Error::MissingColumn { column: "".into(), path: "".into(), required: "".into() },
            Error::InvalidValue { row: 0, column: "".into(), value: "".into() },
            Error::Csv { path: "".into(), message: "".into() },
            Error::EmptyDataset { path: "".into() },
            Error::TooFewClasses { column: "".into(), found: 1 },
            Error::ShapeMismatch { expected: vec![], actual: vec![] },
            Error::Artifact { message: "".into() },
            Error::ParityCheck { agreement: 0.0, required: 1.0, samples: 0 },
            Error::io("", std::io::Error::other("x")),
            Error::Serialization { message: "".into() },
        ]
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = all_errors();
        let codes: std::collections::HashSet<_> = errors.iter().map(Error::code).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_all_error_codes_start_with_e() {
        for err in all_errors() {
            assert!(err.code().starts_with('E'));
        }
    }

    #[test]
    fn test_user_errors_are_recoverable() {
        assert!(Error::DataNotFound { path: "data/data.csv".into() }.is_user_error());
        assert!(Error::TooFewClasses { column: "RiskLevel".into(), found: 1 }.is_user_error());
        assert!(!Error::Artifact { message: "bad".into() }.is_user_error());
    }

    #[test]
    fn test_missing_column_lists_required() {
        let err = Error::MissingColumn {
            column: "BS".into(),
            path: "data/data.csv".into(),
            required: "Age, BS".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'BS'"));
        assert!(msg.contains("data/data.csv"));
        assert!(msg.contains("Required columns: Age, BS"));
    }

    #[test]
    fn test_invalid_value_reports_row_and_column() {
        let err = Error::InvalidValue { row: 7, column: "Age".into(), value: "abc".into() };
        let msg = err.to_string();
        assert!(msg.contains("row 7"));
        assert!(msg.contains("'Age'"));
        assert!(msg.contains("'abc'"));
    }

    #[test]
    fn test_parity_error_suggests_other_modes() {
        let err = Error::ParityCheck { agreement: 0.8, required: 0.95, samples: 20 };
        let msg = err.to_string();
        assert!(msg.contains("0.8000"));
        assert!(msg.contains("float16"));
    }

    #[test]
    fn test_io_error_constructor() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("writing model.tflite", io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("writing model.tflite"));
    }
}
