//! Artifact introspection

use super::model::read_header;
use crate::export::ArtifactMetadata;
use crate::{Error, Result};
use safetensors::SafeTensors;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One stored tensor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorInfo {
    pub name: String,
    pub dtype: String,
    pub shape: Vec<usize>,
    pub bytes: usize,
}

/// Header metadata plus tensor inventory of an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub metadata: ArtifactMetadata,
    pub tensors: Vec<TensorInfo>,
    pub total_bytes: usize,
}

impl ArtifactSummary {
    /// Summarize artifact bytes without building the network
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let metadata = read_header(bytes)?;
        let tensors = SafeTensors::deserialize(bytes).map_err(|e| Error::Artifact {
            message: format!("malformed tensor data: {e}"),
        })?;

        let mut infos: Vec<TensorInfo> = tensors
            .tensors()
            .into_iter()
            .map(|(name, view)| TensorInfo {
                name,
                dtype: format!("{:?}", view.dtype()),
                shape: view.shape().to_vec(),
                bytes: view.data().len(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self { metadata, tensors: infos, total_bytes: bytes.len() })
    }

    /// Bytes taken by tensor data
    pub fn tensor_bytes(&self) -> usize {
        self.tensors.iter().map(|t| t.bytes).sum()
    }
}

impl fmt::Display for ArtifactSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.metadata;
        writeln!(f, "Format version: {}", meta.format_version)?;
        writeln!(f, "Created:        {}", meta.created_at.to_rfc3339())?;
        writeln!(f, "Quantization:   {}", meta.quantization)?;
        writeln!(f, "Features:       {}", meta.feature_names.join(", "))?;
        writeln!(f, "Labels:         {}", meta.labels.join(", "))?;
        writeln!(f, "Size:           {} bytes ({} in tensors)", self.total_bytes, self.tensor_bytes())?;

        writeln!(f, "\nLayers:")?;
        for layer in &meta.layers {
            writeln!(f, "  {:<10} {:>4} -> {:<4} {}", layer.name, layer.in_dim, layer.out_dim, layer.activation.name())?;
        }

        writeln!(f, "\nTensors:")?;
        for t in &self.tensors {
            writeln!(f, "  {:<22} {:<4} {:<10} {:>7} B", t.name, t.dtype, format!("{:?}", t.shape), t.bytes)?;
        }

        if let Some(training) = &meta.training {
            writeln!(f, "\nTraining:")?;
            writeln!(
                f,
                "  {} epochs, batch {}, {} lr={}, seed {}",
                training.epochs, training.batch_size, training.optimizer, training.learning_rate, training.seed
            )?;
            writeln!(
                f,
                "  rows: train {} / validation {} / test {}",
                training.train_rows, training.validation_rows, training.test_rows
            )?;
            match (training.final_loss, training.final_accuracy) {
                (Some(loss), Some(acc)) => writeln!(f, "  final loss {loss:.4}, accuracy {acc:.4}")?,
                _ => writeln!(f, "  final loss not finite")?,
            }
            if let Some(acc) = training.test_accuracy {
                writeln!(f, "  test accuracy {acc:.4}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{serialize_artifact, LayerInfo, LiteGraph, FORMAT_VERSION};
    use crate::nn::Mlp;
    use crate::preprocess::StandardScaler;
    use crate::quant::QuantizationMode;

    #[test]
    fn test_summary_lists_tensors() {
        let model = Mlp::new(2, &[3], 2, 0).unwrap();
        let graph = LiteGraph::from_mlp(&model, QuantizationMode::DynamicInt8);
        let metadata = ArtifactMetadata {
            format_version: FORMAT_VERSION,
            labels: vec!["a".into(), "b".into()],
            feature_names: vec!["x".into(), "y".into()],
            target: "t".into(),
            scaler: StandardScaler::from_parts(vec![0.0; 2], vec![1.0; 2]).unwrap(),
            layers: vec![
                LayerInfo { name: "dense_0".into(), in_dim: 2, out_dim: 3, activation: model.layers()[0].activation },
                LayerInfo { name: "dense_1".into(), in_dim: 3, out_dim: 2, activation: model.layers()[1].activation },
            ],
            quantization: QuantizationMode::DynamicInt8,
            training: None,
            created_at: chrono::Utc::now(),
        };
        let bytes = serialize_artifact(&graph, &metadata).unwrap();

        let summary = ArtifactSummary::from_bytes(&bytes).unwrap();
        let names: Vec<_> = summary.tensors.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["dense_0.bias", "dense_0.weight", "dense_0.weight_scale", "dense_1.bias", "dense_1.weight", "dense_1.weight_scale"]
        );
        assert_eq!(summary.tensors[1].dtype, "I8");
        assert_eq!(summary.tensors[1].bytes, 6);
        assert_eq!(summary.total_bytes, bytes.len());

        let text = summary.to_string();
        assert!(text.contains("dynamic_int8"));
        assert!(text.contains("dense_1"));
    }
}
