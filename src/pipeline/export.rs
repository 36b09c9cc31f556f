//! Conversion and write stage

use super::prepare::PreparedData;
use super::train::TrainedModel;
use crate::config::PipelineSpec;
use crate::eval::ClassificationReport;
use crate::export::{
    serialize_artifact, sha256_hex, verify_parity, write_atomic, ArtifactMetadata, ExportReport, LayerInfo,
    LiteGraph, Sidecar, TrainingSummary, FORMAT_VERSION,
};
use crate::inference::LiteModel;
use crate::{Error, Result};
use chrono::Utc;
use tracing::info;

/// JSON has no NaN or infinity; diverged values are left out of the metadata
fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

fn artifact_metadata(
    trained: &TrainedModel,
    prepared: &PreparedData,
    spec: &PipelineSpec,
    evaluation: Option<&ClassificationReport>,
) -> ArtifactMetadata {
    ArtifactMetadata {
        format_version: FORMAT_VERSION,
        labels: prepared.encoder.classes().to_vec(),
        feature_names: prepared.feature_names.clone(),
        target: prepared.target.clone(),
        scaler: prepared.scaler.clone(),
        layers: LayerInfo::describe(&trained.model),
        quantization: spec.export.quantization,
        training: Some(TrainingSummary {
            epochs: trained.result.final_epoch,
            batch_size: spec.training.batch_size,
            optimizer: trained.optimizer.clone(),
            learning_rate: trained.learning_rate,
            seed: spec.training.seed,
            train_rows: prepared.train.len(),
            validation_rows: prepared.validation.len(),
            test_rows: prepared.test.len(),
            final_loss: finite(trained.result.final_loss),
            final_accuracy: finite(trained.result.final_accuracy),
            val_loss: trained.result.val_loss.and_then(finite),
            val_accuracy: trained.result.val_accuracy.and_then(finite),
            test_accuracy: evaluation.map(|report| report.accuracy),
        }),
        created_at: Utc::now(),
    }
}

/// Convert the trained model, check the converted bytes against the float
/// model, then write the artifact and its JSON sidecar
///
/// Nothing is written until both files are serialized and the parity check
/// passes. Parity runs on the test partition, or on the training partition
/// when there are no test rows.
pub fn export(
    trained: &TrainedModel,
    prepared: &PreparedData,
    spec: &PipelineSpec,
    evaluation: Option<&ClassificationReport>,
) -> Result<ExportReport> {
    let mode = spec.export.quantization;
    info!(quantization = %mode, output = %spec.export.output.display(), "exporting lite model");

    let graph = LiteGraph::from_mlp(&trained.model, mode);
    let metadata = artifact_metadata(trained, prepared, spec, evaluation);
    let bytes = serialize_artifact(&graph, &metadata)?;

    let lite = LiteModel::from_bytes(&bytes)?;
    let reference = if prepared.test.is_empty() { &prepared.train } else { &prepared.test };
    let parity = verify_parity(&trained.model, &lite, reference.features.view(), &spec.export.parity)?;

    let sha256 = sha256_hex(&bytes);
    let sidecar = Sidecar {
        metadata,
        artifact: spec
            .export
            .output
            .file_name()
            .map_or_else(|| spec.export.output.display().to_string(), |n| n.to_string_lossy().into_owned()),
        artifact_bytes: bytes.len(),
        sha256: sha256.clone(),
    };
    let json = serde_json::to_string_pretty(&sidecar)
        .map_err(|e| Error::Serialization { message: format!("metadata sidecar: {e}") })?;

    write_atomic(&spec.export.output, &bytes)?;
    write_atomic(&spec.export.metadata_output, json.as_bytes())?;

    let report = ExportReport {
        artifact_path: spec.export.output.clone(),
        metadata_path: spec.export.metadata_output.clone(),
        artifact_bytes: bytes.len(),
        tensor_bytes: graph.stored_bytes(),
        float_bytes: graph.float_bytes(),
        quantization: mode,
        sha256,
        parity,
    };
    info!(
        path = %report.artifact_path.display(),
        bytes = report.artifact_bytes,
        compression = report.compression_ratio(),
        "lite model written"
    );
    Ok(report)
}
