//! Validation error types
//!
//! Defines all validation error variants for pipeline specifications.

use crate::Error;
use std::path::PathBuf;

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid beta: {0} (must be in [0.0, 1.0))")]
    InvalidBeta(f32),

    #[error("Invalid epsilon: {0} (must be > 0.0)")]
    InvalidEpsilon(f32),

    #[error("Invalid momentum: {0} (must be in [0.0, 1.0))")]
    InvalidMomentum(f32),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid test fraction: {0} (must be in (0.0, 1.0))")]
    InvalidTestFraction(f32),

    #[error("Invalid validation fraction: {0} (must be in [0.0, 1.0))")]
    InvalidValidationFraction(f32),

    #[error("Hidden layers cannot be empty")]
    EmptyHiddenLayers,

    #[error("Hidden layer {0} has zero units")]
    ZeroWidthLayer(usize),

    #[error("Feature list cannot be empty")]
    EmptyFeatures,

    #[error("Duplicate or blank feature column: '{0}'")]
    InvalidFeatureColumn(String),

    #[error("Target column '{0}' is also listed as a feature")]
    TargetIsFeature(String),

    #[error("Invalid delimiter: {0:?} (must be a single ASCII character)")]
    InvalidDelimiter(char),

    #[error("Invalid zero-variance epsilon: {0} (must be >= 0.0)")]
    InvalidZeroVarianceEpsilon(f32),

    #[error("Invalid parity agreement: {0} (must be in [0.0, 1.0])")]
    InvalidParityAgreement(f32),

    #[error("Invalid probability tolerance: {0} (must be >= 0.0)")]
    InvalidProbabilityTolerance(f32),

    #[error("Metadata output {0:?} is the artifact path; the sidecar would overwrite the model")]
    SameOutputPaths(PathBuf),
}

impl ValidationError {
    /// Config field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidLearningRate(_) => "optimizer.lr",
            Self::InvalidBeta(_) => "optimizer.beta1/beta2",
            Self::InvalidEpsilon(_) => "optimizer.epsilon",
            Self::InvalidMomentum(_) => "optimizer.momentum",
            Self::InvalidBatchSize(_) => "training.batch_size",
            Self::InvalidEpochs(_) => "training.epochs",
            Self::InvalidTestFraction(_) => "split.test_fraction",
            Self::InvalidValidationFraction(_) => "split.validation_fraction",
            Self::EmptyHiddenLayers | Self::ZeroWidthLayer(_) => "model.hidden_units",
            Self::EmptyFeatures | Self::InvalidFeatureColumn(_) => "data.features",
            Self::TargetIsFeature(_) => "data.target",
            Self::InvalidDelimiter(_) => "data.delimiter",
            Self::InvalidZeroVarianceEpsilon(_) => "preprocess.zero_variance_epsilon",
            Self::InvalidParityAgreement(_) => "export.parity.min_agreement",
            Self::InvalidProbabilityTolerance(_) => "export.parity.probability_tolerance",
            Self::SameOutputPaths(_) => "export.metadata_output",
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::config_value(err.field(), err.to_string(), "Fix the value or remove it to use the default")
    }
}
