//! Pipeline summary

use crate::eval::ClassificationReport;
use crate::export::ExportReport;
use crate::train::{TrainHistory, TrainResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub rows: usize,
    pub class_counts: BTreeMap<String, usize>,
    /// Class names in code order
    pub labels: Vec<String>,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub test_rows: usize,
    pub optimizer: String,
    pub training: TrainResult,
    pub history: TrainHistory,
    /// Absent when the test partition is empty
    pub evaluation: Option<ClassificationReport>,
    pub export: ExportReport,
    pub elapsed_secs: f64,
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rows: {} (train {}, validation {}, test {})",
            self.rows, self.train_rows, self.validation_rows, self.test_rows
        )?;
        writeln!(f, "Classes: {}", self.labels.join(", "))?;
        write!(
            f,
            "Training: {} epochs with {}, loss {:.4}, accuracy {:.4}",
            self.training.final_epoch, self.optimizer, self.training.final_loss, self.training.final_accuracy
        )?;
        if let (Some(loss), Some(acc)) = (self.training.val_loss, self.training.val_accuracy) {
            write!(f, ", val_loss {loss:.4}, val_accuracy {acc:.4}")?;
        }
        writeln!(f)?;
        if let Some(eval) = &self.evaluation {
            writeln!(f)?;
            writeln!(f, "{eval}")?;
        }
        writeln!(
            f,
            "Artifact: {} ({} bytes, {}, {:.1}x smaller tensors)",
            self.export.artifact_path.display(),
            self.export.artifact_bytes,
            self.export.quantization,
            self.export.compression_ratio()
        )?;
        writeln!(f, "Metadata: {}", self.export.metadata_path.display())?;
        write!(
            f,
            "Parity: {:.2}% arg-max agreement on {} samples, max drift {:.4}",
            self.export.parity.agreement * 100.0,
            self.export.parity.samples,
            self.export.parity.max_probability_drift
        )
    }
}
