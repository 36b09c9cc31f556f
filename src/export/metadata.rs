//! Artifact metadata embedded in the lite header and written as a sidecar

use crate::nn::{Activation, Mlp};
use crate::preprocess::StandardScaler;
use crate::quant::QuantizationMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value of the `format` header key
pub const FORMAT_TAG: &str = "matheal-lite";

/// Bumped on incompatible layout changes
pub const FORMAT_VERSION: u32 = 1;

/// Shape and activation of one exported layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    /// Tensor name prefix, e.g. `dense_0`
    pub name: String,
    pub in_dim: usize,
    pub out_dim: usize,
    pub activation: Activation,
}

impl LayerInfo {
    /// One entry per dense layer, named as the artifact tensors are
    pub fn describe(model: &Mlp) -> Vec<Self> {
        model
            .layers()
            .iter()
            .enumerate()
            .map(|(i, layer)| Self {
                name: format!("dense_{i}"),
                in_dim: layer.in_dim(),
                out_dim: layer.out_dim(),
                activation: layer.activation,
            })
            .collect()
    }
}

/// How the exported model was trained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub epochs: usize,
    pub batch_size: usize,
    pub optimizer: String,
    pub learning_rate: f32,
    pub seed: u64,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub test_rows: usize,
    /// Absent when training diverged to a non-finite value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_loss: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_accuracy: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_loss: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_accuracy: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_accuracy: Option<f64>,
}

/// Everything a consumer needs besides the tensors: class names in code
/// order, input column order and the scaler to apply to raw vitals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub format_version: u32,
    /// Class names; index = output unit
    pub labels: Vec<String>,
    /// Input columns, in order
    pub feature_names: Vec<String>,
    pub target: String,
    pub scaler: StandardScaler,
    pub layers: Vec<LayerInfo>,
    pub quantization: QuantizationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingSummary>,
    pub created_at: DateTime<Utc>,
}

impl ArtifactMetadata {
    /// Model input width
    pub fn input_dim(&self) -> usize {
        self.feature_names.len()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::Error::Serialization {
            message: format!("artifact metadata: {e}"),
        })
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::Artifact {
            message: format!("metadata is not valid JSON: {e}"),
        })
    }
}

/// JSON written next to the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sidecar {
    #[serde(flatten)]
    pub metadata: ArtifactMetadata,
    /// Artifact file name
    pub artifact: String,
    pub artifact_bytes: usize,
    /// Hex SHA-256 of the artifact bytes
    pub sha256: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_metadata() -> ArtifactMetadata {
        ArtifactMetadata {
            format_version: FORMAT_VERSION,
            labels: vec!["high risk".into(), "low risk".into(), "mid risk".into()],
            feature_names: crate::config::DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
            target: "RiskLevel".into(),
            scaler: StandardScaler::from_parts(vec![0.0; 6], vec![1.0; 6]).unwrap(),
            layers: vec![LayerInfo {
                name: "dense_0".into(),
                in_dim: 6,
                out_dim: 3,
                activation: Activation::Softmax,
            }],
            quantization: QuantizationMode::DynamicInt8,
            training: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let meta = sample_metadata();
        let parsed = ArtifactMetadata::from_json(&meta.to_json().unwrap()).unwrap();
        assert_eq!(parsed, meta);
        assert_eq!(parsed.input_dim(), 6);
    }

    #[test]
    fn test_sidecar_flattens_metadata() {
        let sidecar = Sidecar {
            metadata: sample_metadata(),
            artifact: "model.tflite".into(),
            artifact_bytes: 10,
            sha256: "ab".into(),
        };
        let value = serde_json::to_value(&sidecar).unwrap();
        assert_eq!(value["labels"][1], "low risk");
        assert_eq!(value["quantization"], "dynamic_int8");
        assert_eq!(value["sha256"], "ab");
        assert!(value.get("training").is_none());
    }

    #[test]
    fn test_invalid_json_is_artifact_error() {
        assert!(matches!(ArtifactMetadata::from_json("{"), Err(crate::Error::Artifact { .. })));
    }
}
