//! YAML schema for the training and export pipeline
//!
//! Every field carries a serde default, so an empty document is a complete
//! configuration.

use crate::quant::QuantizationMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Vital-sign feature columns in model input order.
pub const DEFAULT_FEATURES: [&str; 6] =
    ["Age", "SystolicBP", "DiastolicBP", "BS", "BodyTemp", "HeartRate"];

/// Categorical target column.
pub const DEFAULT_TARGET: &str = "RiskLevel";

/// Complete pipeline specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PipelineSpec {
    /// Input data configuration
    #[serde(default)]
    pub data: DataSpec,

    /// Feature scaling configuration
    #[serde(default)]
    pub preprocess: PreprocessSpec,

    /// Train/validation/test partitioning
    #[serde(default)]
    pub split: SplitSpec,

    /// Network topology
    #[serde(default)]
    pub model: ModelSpec,

    /// Optimizer hyperparameters
    #[serde(default)]
    pub optimizer: OptimSpec,

    /// Training loop parameters
    #[serde(default)]
    pub training: TrainingParams,

    /// Lite conversion and output
    #[serde(default)]
    pub export: ExportSpec,
}

/// Input data configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    /// CSV file path
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    /// Field delimiter (single byte)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Feature columns, in model input order
    #[serde(default = "default_features")]
    pub features: Vec<String>,

    /// Categorical target column
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for DataSpec {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
            features: default_features(),
            target: default_target(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/data.csv")
}

fn default_delimiter() -> char {
    ','
}

fn default_features() -> Vec<String> {
    DEFAULT_FEATURES.iter().map(|s| (*s).to_string()).collect()
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

/// Feature scaling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessSpec {
    /// Standard deviations below this are treated as zero variance;
    /// such columns get a scale of 1.0 instead of dividing by ~0.
    #[serde(default = "default_zero_variance_epsilon")]
    pub zero_variance_epsilon: f32,
}

impl Default for PreprocessSpec {
    fn default() -> Self {
        Self { zero_variance_epsilon: default_zero_variance_epsilon() }
    }
}

fn default_zero_variance_epsilon() -> f32 {
    1e-8
}

/// Train/validation/test partitioning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSpec {
    /// Fraction of rows held out as the test partition
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f32,

    /// Fraction of the training partition carved off (from its tail) for
    /// per-epoch validation
    #[serde(default = "default_validation_fraction")]
    pub validation_fraction: f32,

    /// Seed for the test split permutation
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            validation_fraction: default_validation_fraction(),
            seed: default_seed(),
        }
    }
}

fn default_test_fraction() -> f32 {
    0.2
}

fn default_validation_fraction() -> f32 {
    0.2
}

fn default_seed() -> u64 {
    42
}

/// Network topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Hidden layer widths (ReLU); the output layer width is the class count
    #[serde(default = "default_hidden_units")]
    pub hidden_units: Vec<usize>,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self { hidden_units: default_hidden_units() }
    }
}

fn default_hidden_units() -> Vec<usize> {
    vec![32, 16]
}

/// Optimizer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// Adam with bias correction
    #[default]
    Adam,
    /// Stochastic gradient descent with optional momentum
    Sgd,
}

impl std::fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Adam => write!(f, "adam"),
            Self::Sgd => write!(f, "sgd"),
        }
    }
}

/// Optimizer hyperparameters
///
/// Defaults match the Keras `Adam()` constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Optimizer name: "adam" | "sgd"
    #[serde(default)]
    pub name: OptimizerKind,

    /// Learning rate
    #[serde(default = "default_lr")]
    pub lr: f32,

    /// First moment decay (adam)
    #[serde(default = "default_beta1")]
    pub beta1: f32,

    /// Second moment decay (adam)
    #[serde(default = "default_beta2")]
    pub beta2: f32,

    /// Numerical stability term (adam)
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,

    /// Momentum (sgd)
    #[serde(default)]
    pub momentum: f32,
}

impl Default for OptimSpec {
    fn default() -> Self {
        Self {
            name: OptimizerKind::Adam,
            lr: default_lr(),
            beta1: default_beta1(),
            beta2: default_beta2(),
            epsilon: default_epsilon(),
            momentum: 0.0,
        }
    }
}

fn default_lr() -> f32 {
    0.001
}

fn default_beta1() -> f32 {
    0.9
}

fn default_beta2() -> f32 {
    0.999
}

fn default_epsilon() -> f32 {
    1e-7
}

/// Training loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Passes over the training partition
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// Mini-batch size
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Seed for weight init and per-epoch shuffling
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Reshuffle the training partition every epoch
    #[serde(default = "default_true")]
    pub shuffle: bool,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            seed: default_seed(),
            shuffle: true,
        }
    }
}

fn default_epochs() -> usize {
    50
}

fn default_batch_size() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Lite conversion and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSpec {
    /// Lite artifact path (overwritten)
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// JSON sidecar with labels, scaler and architecture
    #[serde(default = "default_metadata_output")]
    pub metadata_output: PathBuf,

    /// Weight quantization applied during conversion
    #[serde(default)]
    pub quantization: QuantizationMode,

    /// Float vs. lite agreement requirements
    #[serde(default)]
    pub parity: ParitySpec,
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self {
            output: default_output(),
            metadata_output: default_metadata_output(),
            quantization: QuantizationMode::default(),
            parity: ParitySpec::default(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("model.tflite")
}

fn default_metadata_output() -> PathBuf {
    PathBuf::from("model.meta.json")
}

/// Float vs. lite agreement requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParitySpec {
    /// Minimum fraction of samples whose arg-max must match
    #[serde(default = "default_min_agreement")]
    pub min_agreement: f32,

    /// Probability drift above this is reported as a warning
    #[serde(default = "default_probability_tolerance")]
    pub probability_tolerance: f32,
}

impl Default for ParitySpec {
    fn default() -> Self {
        Self {
            min_agreement: default_min_agreement(),
            probability_tolerance: default_probability_tolerance(),
        }
    }
}

fn default_min_agreement() -> f32 {
    0.95
}

fn default_probability_tolerance() -> f32 {
    0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_reproduces_defaults() {
        let spec: PipelineSpec = serde_yaml::from_str("{}").unwrap();
        assert_eq!(spec, PipelineSpec::default());
        assert_eq!(spec.data.path, PathBuf::from("data/data.csv"));
        assert_eq!(spec.data.features.len(), 6);
        assert_eq!(spec.data.target, "RiskLevel");
        assert_eq!(spec.model.hidden_units, vec![32, 16]);
        assert_eq!(spec.training.epochs, 50);
        assert_eq!(spec.training.batch_size, 10);
        assert_eq!(spec.split.seed, 42);
        assert_eq!(spec.export.output, PathBuf::from("model.tflite"));
        assert_eq!(spec.export.quantization, QuantizationMode::DynamicInt8);
    }

    #[test]
    fn test_adam_defaults_match_keras() {
        let optim = OptimSpec::default();
        assert_eq!(optim.name, OptimizerKind::Adam);
        assert_eq!(optim.lr, 0.001);
        assert_eq!(optim.beta1, 0.9);
        assert_eq!(optim.beta2, 0.999);
        assert_eq!(optim.epsilon, 1e-7);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
data:
  path: other.csv
optimizer:
  name: sgd
  lr: 0.01
  momentum: 0.9
training:
  epochs: 5
export:
  quantization: float16
"#;
        let spec: PipelineSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.data.path, PathBuf::from("other.csv"));
        assert_eq!(spec.data.target, "RiskLevel");
        assert_eq!(spec.optimizer.name, OptimizerKind::Sgd);
        assert_eq!(spec.optimizer.momentum, 0.9);
        assert_eq!(spec.training.epochs, 5);
        assert_eq!(spec.training.batch_size, 10);
        assert_eq!(spec.export.quantization, QuantizationMode::Float16);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let spec = PipelineSpec::default();
        let yaml = serde_yaml::to_string(&spec).unwrap();
        let parsed: PipelineSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_unknown_optimizer_rejected() {
        let result: Result<PipelineSpec, _> = serde_yaml::from_str("optimizer:\n  name: lbfgs\n");
        assert!(result.is_err());
    }
}
