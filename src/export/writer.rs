//! Artifact serialization and atomic file output

use super::graph::{LiteGraph, LiteWeights};
use super::metadata::{ArtifactMetadata, FORMAT_TAG, FORMAT_VERSION};
use super::parity::ParityReport;
use crate::quant::QuantizationMode;
use crate::{Error, Result};
use safetensors::tensor::{Dtype, TensorView};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What an export produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    pub artifact_path: PathBuf,
    pub metadata_path: PathBuf,
    /// File size, header included
    pub artifact_bytes: usize,
    /// Weight and bias payload as stored
    pub tensor_bytes: usize,
    /// Size of the same tensors stored as f32
    pub float_bytes: usize,
    pub quantization: QuantizationMode,
    pub sha256: String,
    pub parity: ParityReport,
}

impl ExportReport {
    /// Float payload size over stored payload size
    pub fn compression_ratio(&self) -> f32 {
        self.float_bytes as f32 / self.tensor_bytes.max(1) as f32
    }
}

/// Serialize the graph into a safetensors container with the metadata in
/// its header
///
/// Tensors per layer `i`: `dense_{i}.weight` `[out, in]` (I8, F16 or F32),
/// `dense_{i}.weight_scale` `[out]` (F32, int8 only), `dense_{i}.bias` `[out]` (F32).
pub fn serialize_artifact(graph: &LiteGraph, metadata: &ArtifactMetadata) -> Result<Vec<u8>> {
    let mut tensor_data: Vec<(String, Dtype, Vec<usize>, Vec<u8>)> = Vec::new();

    for (i, layer) in graph.layers.iter().enumerate() {
        let (out_dim, in_dim) = layer.weights.shape();
        let prefix = format!("dense_{i}");

        match &layer.weights {
            LiteWeights::Int8(q) => {
                let bytes: Vec<u8> = bytemuck::cast_slice(&q.data).to_vec();
                tensor_data.push((format!("{prefix}.weight"), Dtype::I8, vec![out_dim, in_dim], bytes));
                let scales: Vec<u8> = bytemuck::cast_slice(&q.scales).to_vec();
                tensor_data.push((format!("{prefix}.weight_scale"), Dtype::F32, vec![out_dim], scales));
            }
            LiteWeights::Float16 { values, .. } => {
                let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_bits().to_le_bytes()).collect();
                tensor_data.push((format!("{prefix}.weight"), Dtype::F16, vec![out_dim, in_dim], bytes));
            }
            LiteWeights::Float32(w) => {
                let values: Vec<f32> = w.iter().copied().collect();
                let bytes: Vec<u8> = bytemuck::cast_slice(&values).to_vec();
                tensor_data.push((format!("{prefix}.weight"), Dtype::F32, vec![out_dim, in_dim], bytes));
            }
        }

        let bias: Vec<f32> = layer.bias.iter().copied().collect();
        let bytes: Vec<u8> = bytemuck::cast_slice(&bias).to_vec();
        tensor_data.push((format!("{prefix}.bias"), Dtype::F32, vec![bias.len()], bytes));
    }

    let views = tensor_data
        .iter()
        .map(|(name, dtype, shape, bytes)| {
            TensorView::new(*dtype, shape.clone(), bytes)
                .map(|view| (name.as_str(), view))
                .map_err(|e| Error::Serialization { message: format!("tensor {name}: {e}") })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut header = HashMap::new();
    header.insert("format".to_string(), FORMAT_TAG.to_string());
    header.insert("format_version".to_string(), FORMAT_VERSION.to_string());
    header.insert("metadata".to_string(), metadata.to_json()?);

    safetensors::serialize(views, Some(header)).map_err(|e| Error::Serialization {
        message: format!("SafeTensors serialization failed: {e}"),
    })
}

/// Write `bytes` to `path` via a temp file in the same directory and a rename
///
/// Readers see either the previous file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(format!("creating temp file in {}", dir.display()), e))?;
    temp.write_all(bytes).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
    temp.as_file().sync_all().map_err(|e| Error::io(format!("flushing {}", path.display()), e))?;
    temp.persist(path)
        .map_err(|e| Error::io(format!("renaming temp file onto {}", path.display()), e.error))?;
    Ok(())
}

/// Lowercase hex SHA-256
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}
