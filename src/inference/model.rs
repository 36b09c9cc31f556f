//! Artifact loading and inference

use super::Prediction;
use crate::export::{ArtifactMetadata, FORMAT_TAG, FORMAT_VERSION};
use crate::nn::{argmax_rows, Dense, Mlp};
use crate::preprocess::LabelEncoder;
use crate::{Error, Result};
use half::f16;
use ndarray::{Array1, Array2, ArrayView2};
use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use std::fs;
use std::path::Path;
use tracing::debug;

fn artifact_error(message: impl Into<String>) -> Error {
    Error::Artifact { message: message.into() }
}

pub(crate) fn decode_f32(data: &[u8]) -> Vec<f32> {
    data.chunks_exact(4).map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect()
}

fn decode_f16(data: &[u8]) -> Vec<f32> {
    data.chunks_exact(2).map(|c| f16::from_bits(u16::from_le_bytes([c[0], c[1]])).to_f32()).collect()
}

fn decode_i8(data: &[u8]) -> Vec<i8> {
    data.iter().map(|&b| b as i8).collect()
}

/// Read the string header of a safetensors artifact and check the format tag
pub(crate) fn read_header(bytes: &[u8]) -> Result<ArtifactMetadata> {
    let (_, header) = SafeTensors::read_metadata(bytes)
        .map_err(|e| artifact_error(format!("not a safetensors container: {e}")))?;
    let info = header
        .metadata()
        .as_ref()
        .ok_or_else(|| artifact_error("header carries no metadata"))?;

    match info.get("format").map(String::as_str) {
        Some(FORMAT_TAG) => {}
        Some(other) => return Err(artifact_error(format!("unexpected format '{other}', expected '{FORMAT_TAG}'"))),
        None => return Err(artifact_error("header has no 'format' key")),
    }

    let version: u32 = info
        .get("format_version")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| artifact_error("missing or invalid 'format_version'"))?;
    if version != FORMAT_VERSION {
        return Err(artifact_error(format!(
            "unsupported format version {version} (this build reads {FORMAT_VERSION})"
        )));
    }

    let json = info.get("metadata").ok_or_else(|| artifact_error("header has no 'metadata' key"))?;
    ArtifactMetadata::from_json(json)
}

fn tensor<'a>(tensors: &'a SafeTensors<'a>, name: &str) -> Result<TensorView<'a>> {
    tensors.tensor(name).map_err(|_| artifact_error(format!("missing tensor '{name}'")))
}

fn expect_shape(name: &str, view: &TensorView<'_>, shape: &[usize]) -> Result<()> {
    if view.shape() != shape {
        return Err(artifact_error(format!(
            "tensor '{name}' has shape {:?}, expected {shape:?}",
            view.shape()
        )));
    }
    Ok(())
}

/// Decode `{prefix}.weight` (and its scales for int8) into f32 `[out, in]`
fn read_weight(tensors: &SafeTensors<'_>, prefix: &str, out_dim: usize, in_dim: usize) -> Result<Array2<f32>> {
    let name = format!("{prefix}.weight");
    let view = tensor(tensors, &name)?;
    expect_shape(&name, &view, &[out_dim, in_dim])?;

    let values = match view.dtype() {
        Dtype::F32 => decode_f32(view.data()),
        Dtype::F16 => decode_f16(view.data()),
        Dtype::I8 => {
            let scale_name = format!("{prefix}.weight_scale");
            let scales_view = tensor(tensors, &scale_name)?;
            expect_shape(&scale_name, &scales_view, &[out_dim])?;
            if scales_view.dtype() != Dtype::F32 {
                return Err(artifact_error(format!("tensor '{scale_name}' must be F32")));
            }
            let scales = decode_f32(scales_view.data());
            decode_i8(view.data())
                .iter()
                .enumerate()
                .map(|(i, &q)| f32::from(q) * scales[i / in_dim.max(1)])
                .collect()
        }
        other => return Err(artifact_error(format!("tensor '{name}' has unsupported dtype {other:?}"))),
    };

    Array2::from_shape_vec((out_dim, in_dim), values)
        .map_err(|e| artifact_error(format!("tensor '{name}': {e}")))
}

fn read_bias(tensors: &SafeTensors<'_>, prefix: &str, out_dim: usize) -> Result<Array1<f32>> {
    let name = format!("{prefix}.bias");
    let view = tensor(tensors, &name)?;
    expect_shape(&name, &view, &[out_dim])?;
    if view.dtype() != Dtype::F32 {
        return Err(artifact_error(format!("tensor '{name}' must be F32")));
    }
    Ok(Array1::from(decode_f32(view.data())))
}

/// A validated, ready-to-run lite model
#[derive(Debug, Clone)]
pub struct LiteModel {
    metadata: ArtifactMetadata,
    network: Mlp,
    encoder: LabelEncoder,
}

impl LiteModel {
    /// Parse and validate artifact bytes
    ///
    /// Checks the format tag and version, that every layer's tensors exist
    /// with the recorded shapes and supported dtypes, that widths chain, and
    /// that input/output widths match the feature and label counts.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let metadata = read_header(bytes)?;
        let tensors = SafeTensors::deserialize(bytes)
            .map_err(|e| artifact_error(format!("malformed tensor data: {e}")))?;

        if metadata.layers.is_empty() {
            return Err(artifact_error("metadata lists no layers"));
        }

        let mut layers = Vec::with_capacity(metadata.layers.len());
        for info in &metadata.layers {
            let weight = read_weight(&tensors, &info.name, info.out_dim, info.in_dim)?;
            let bias = read_bias(&tensors, &info.name, info.out_dim)?;
            layers.push(Dense::from_parts(weight.reversed_axes(), bias, info.activation));
        }
        let network = Mlp::from_layers(layers).map_err(|e| artifact_error(format!("layer chain: {e}")))?;

        let scaler = &metadata.scaler;
        if scaler.mean().len() != scaler.scale().len() {
            return Err(artifact_error("scaler mean and scale lengths differ"));
        }
        if network.input_dim() != metadata.input_dim() || scaler.n_features() != metadata.input_dim() {
            return Err(artifact_error(format!(
                "input width {} does not match {} feature names / {} scaler entries",
                network.input_dim(),
                metadata.input_dim(),
                scaler.n_features()
            )));
        }
        if network.output_dim() != metadata.labels.len() {
            return Err(artifact_error(format!(
                "output width {} does not match {} labels",
                network.output_dim(),
                metadata.labels.len()
            )));
        }

        debug!(
            layers = metadata.layers.len(),
            quantization = %metadata.quantization,
            classes = metadata.labels.len(),
            "loaded lite model"
        );

        let encoder = LabelEncoder::from_classes(metadata.labels.clone());
        if encoder.classes() != metadata.labels.as_slice() {
            return Err(artifact_error("labels are not sorted and distinct"));
        }
        Ok(Self { metadata, network, encoder })
    }

    /// Read and validate an artifact file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        Self::from_bytes(&bytes)
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    /// Class names in output order
    pub fn labels(&self) -> &[String] {
        self.encoder.classes()
    }

    /// Dequantized network as executed
    pub fn network(&self) -> &Mlp {
        &self.network
    }

    /// Probabilities for already standardized rows
    pub fn predict_proba_scaled(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        self.network.forward(x)
    }

    /// Classify already standardized rows
    pub fn predict_scaled(&self, x: ArrayView2<'_, f32>) -> Result<Vec<Prediction>> {
        let probs = self.predict_proba_scaled(x)?;
        let classes = argmax_rows(probs.view());
        Ok(classes
            .into_iter()
            .zip(probs.rows())
            .map(|(class_index, row)| Prediction {
                class_index,
                label: self.encoder.decode(class_index).unwrap_or_default().to_string(),
                probabilities: row.to_vec(),
            })
            .collect())
    }

    /// Classify one sample of raw vitals in `feature_names` order
    pub fn predict_raw(&self, features: &[f32]) -> Result<Prediction> {
        let scaled = self.metadata.scaler.transform_row(features)?;
        let width = scaled.len();
        let x = Array2::from_shape_vec((1, width), scaled)
            .map_err(|_| Error::ShapeMismatch { expected: vec![1, self.network.input_dim()], actual: vec![1, width] })?;
        self.predict_scaled(x.view())?
            .pop()
            .ok_or_else(|| artifact_error("model produced no output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{serialize_artifact, LayerInfo, LiteGraph};
    use crate::nn::Activation;
    use crate::preprocess::StandardScaler;
    use crate::quant::QuantizationMode;
    use approx::assert_relative_eq;
    use chrono::Utc;
    use ndarray::array;
    use std::collections::HashMap;

    fn metadata_for(model: &Mlp, mode: QuantizationMode) -> ArtifactMetadata {
        ArtifactMetadata {
            format_version: FORMAT_VERSION,
            labels: vec!["high risk".into(), "low risk".into(), "mid risk".into()],
            feature_names: crate::config::DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
            target: "RiskLevel".into(),
            scaler: StandardScaler::from_parts(vec![30.0, 110.0, 75.0, 8.0, 98.5, 75.0], vec![10.0, 15.0, 10.0, 3.0, 1.0, 7.0])
                .unwrap(),
            layers: LayerInfo::describe(model),
            quantization: mode,
            training: None,
            created_at: Utc::now(),
        }
    }

    fn artifact(mode: QuantizationMode) -> (Mlp, Vec<u8>) {
        let model = Mlp::new(6, &[32, 16], 3, 42).unwrap();
        let graph = LiteGraph::from_mlp(&model, mode);
        let bytes = serialize_artifact(&graph, &metadata_for(&model, mode)).unwrap();
        (model, bytes)
    }

    #[test]
    fn test_float32_roundtrip_is_exact() {
        let (model, bytes) = artifact(QuantizationMode::None);
        let lite = LiteModel::from_bytes(&bytes).unwrap();
        assert_eq!(lite.network(), &model);
        assert_eq!(lite.labels()[1], "low risk");
    }

    #[test]
    fn test_int8_predictions_close_to_float() {
        let (model, bytes) = artifact(QuantizationMode::DynamicInt8);
        let lite = LiteModel::from_bytes(&bytes).unwrap();
        let x = array![[0.1f32, -0.5, 1.2, 0.0, -1.0, 0.3], [1.5, 1.0, -0.2, 2.0, 0.4, -0.8]];
        let float = model.forward(x.view()).unwrap();
        let quant = lite.predict_proba_scaled(x.view()).unwrap();
        for (a, b) in float.iter().zip(quant.iter()) {
            assert!((a - b).abs() < 0.05, "{a} vs {b}");
        }
    }

    #[test]
    fn test_predict_raw_applies_scaler() {
        let (_, bytes) = artifact(QuantizationMode::Float16);
        let lite = LiteModel::from_bytes(&bytes).unwrap();
        let pred = lite.predict_raw(&[25.0, 120.0, 80.0, 6.5, 98.0, 76.0]).unwrap();
        assert_eq!(pred.probabilities.len(), 3);
        assert_relative_eq!(pred.probabilities.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        assert_eq!(pred.label, lite.labels()[pred.class_index]);

        let scaled = lite.metadata().scaler.transform_row(&[25.0, 120.0, 80.0, 6.5, 98.0, 76.0]).unwrap();
        let x = Array2::from_shape_vec((1, 6), scaled).unwrap();
        assert_eq!(lite.predict_scaled(x.view()).unwrap()[0], pred);
    }

    #[test]
    fn test_predict_raw_rejects_wrong_width() {
        let (_, bytes) = artifact(QuantizationMode::None);
        let lite = LiteModel::from_bytes(&bytes).unwrap();
        assert!(lite.predict_raw(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(LiteModel::from_bytes(b"not a model"), Err(Error::Artifact { .. })));
    }

    #[test]
    fn test_rejects_foreign_safetensors() {
        let data: Vec<u8> = bytemuck::cast_slice(&[1.0f32, 2.0]).to_vec();
        let view = TensorView::new(Dtype::F32, vec![2], &data).unwrap();
        let mut header = HashMap::new();
        header.insert("format".to_string(), "pt".to_string());
        let bytes = safetensors::serialize(vec![("w", view)], Some(header)).unwrap();
        let err = LiteModel::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("unexpected format 'pt'"));
    }

    #[test]
    fn test_rejects_label_count_mismatch() {
        let model = Mlp::new(6, &[4], 3, 0).unwrap();
        let graph = LiteGraph::from_mlp(&model, QuantizationMode::None);
        let mut meta = metadata_for(&model, QuantizationMode::None);
        meta.labels.pop();
        let bytes = serialize_artifact(&graph, &meta).unwrap();
        let err = LiteModel::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("2 labels"));
    }

    #[test]
    fn test_rejects_unsorted_labels() {
        let model = Mlp::new(6, &[4], 3, 0).unwrap();
        let graph = LiteGraph::from_mlp(&model, QuantizationMode::None);
        let mut meta = metadata_for(&model, QuantizationMode::None);
        meta.labels.swap(0, 2);
        let bytes = serialize_artifact(&graph, &meta).unwrap();
        let err = LiteModel::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("sorted and distinct"));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let model = Mlp::new(6, &[4], 3, 0).unwrap();
        let graph = LiteGraph::from_mlp(&model, QuantizationMode::DynamicInt8);
        let mut meta = metadata_for(&model, QuantizationMode::DynamicInt8);
        meta.layers[0].out_dim = 5;
        let bytes = serialize_artifact(&graph, &meta).unwrap();
        assert!(LiteModel::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let (_, bytes) = artifact(QuantizationMode::DynamicInt8);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.tflite");
        std::fs::write(&path, &bytes).unwrap();
        let lite = LiteModel::load(&path).unwrap();
        assert_eq!(lite.metadata().quantization, QuantizationMode::DynamicInt8);
        assert!(LiteModel::load(&dir.path().join("missing.tflite")).is_err());
    }

    #[test]
    fn test_activation_survives() {
        let (_, bytes) = artifact(QuantizationMode::None);
        let lite = LiteModel::from_bytes(&bytes).unwrap();
        assert_eq!(lite.network().layers()[0].activation, Activation::Relu);
    }
}
