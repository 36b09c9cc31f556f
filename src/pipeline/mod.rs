//! End-to-end training and export pipeline
//!
//! Each stage is a plain function from explicit inputs to explicit outputs:
//!
//! 1. [`load`] reads the CSV into a [`Dataset`](crate::data::Dataset)
//! 2. [`prepare`] encodes labels, standardizes features and partitions rows
//! 3. [`train`] builds the network and fits it
//! 4. [`evaluate`] scores the held-out test partition
//! 5. [`export`] converts, verifies and writes the lite artifact
//!
//! [`run_pipeline`] chains them once and stops at the first error.

mod export;
mod prepare;
mod report;
mod train;


pub use export::export;
pub use prepare::{load, prepare, PreparedData};
pub use report::PipelineReport;
pub use train::{evaluate, train, TrainedModel};

use crate::config::PipelineSpec;
use crate::Result;
use std::time::Instant;
use tracing::info;

/// Run every stage with `spec`
pub fn run_pipeline(spec: &PipelineSpec) -> Result<PipelineReport> {
    let start = Instant::now();

    let dataset = load(spec)?;
    let prepared = prepare(&dataset, spec)?;
    let trained = train(&prepared, spec)?;
    let evaluation = evaluate(&trained, &prepared)?;
    let exported = export(&trained, &prepared, spec, evaluation.as_ref())?;

    let report = PipelineReport {
        rows: dataset.len(),
        class_counts: dataset
            .class_counts()
            .into_iter()
            .map(|(label, n)| (label.to_string(), n))
            .collect(),
        labels: prepared.encoder.classes().to_vec(),
        train_rows: prepared.train.len(),
        validation_rows: prepared.validation.len(),
        test_rows: prepared.test.len(),
        optimizer: trained.optimizer.clone(),
        training: trained.result.clone(),
        history: trained.history.clone(),
        evaluation,
        export: exported,
        elapsed_secs: start.elapsed().as_secs_f64(),
    };

    info!(elapsed_secs = report.elapsed_secs, "pipeline complete");
    Ok(report)
}
