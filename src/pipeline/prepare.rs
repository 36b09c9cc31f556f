//! Ingestion and preparation stages

use crate::config::PipelineSpec;
use crate::data::{load_csv, Dataset};
use crate::preprocess::{one_hot, train_test_split, validation_split, LabelEncoder, Partition, StandardScaler};
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Encoded, scaled and partitioned data ready for training
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub encoder: LabelEncoder,
    /// Fitted on the full feature matrix before splitting
    pub scaler: StandardScaler,
    pub feature_names: Vec<String>,
    pub target: String,
    /// Rows the optimizer sees
    pub train: Partition,
    /// Tail of the shuffled training rows, scored after each epoch
    pub validation: Partition,
    /// Held-out rows
    pub test: Partition,
    /// Dataset row index of every test row
    pub test_indices: Vec<usize>,
}

impl PreparedData {
    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.encoder.n_classes()
    }

    /// Model input width
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

/// Read the configured CSV
pub fn load(spec: &PipelineSpec) -> Result<Dataset> {
    info!(path = %spec.data.path.display(), "loading dataset");
    let dataset = load_csv(&spec.data)?;
    info!(rows = dataset.len(), features = dataset.n_features(), "dataset loaded");
    for (label, count) in dataset.class_counts() {
        debug!(label, count, "class count");
    }
    Ok(dataset)
}

/// Encode labels, one-hot the targets, standardize the features and split
/// into train, validation and test partitions
///
/// The scaler is fitted on every row, test rows included.
pub fn prepare(dataset: &Dataset, spec: &PipelineSpec) -> Result<PreparedData> {
    info!(rows = dataset.len(), "preparing data");

    let encoder = LabelEncoder::fit(&dataset.labels);
    if encoder.n_classes() < 2 {
        return Err(Error::TooFewClasses {
            column: dataset.target_name.clone(),
            found: encoder.n_classes(),
        });
    }
    let codes = encoder.transform(&dataset.labels)?;
    let targets = one_hot(&codes, encoder.n_classes());

    let scaler = StandardScaler::fit(dataset.features.view(), spec.preprocess.zero_variance_epsilon)?;
    let scaled = scaler.transform(dataset.features.view())?;

    let split = train_test_split(dataset.len(), spec.split.test_fraction, spec.split.seed);
    let fit_rows = Partition::select(scaled.view(), targets.view(), &codes, &split.train);
    let test = Partition::select(scaled.view(), targets.view(), &codes, &split.test);

    let keep = validation_split(fit_rows.len(), spec.split.validation_fraction);
    let (train, validation) = fit_rows.split_at(keep);

    if validation.is_empty() {
        warn!("validation partition is empty; per-epoch validation metrics are skipped");
    }
    if test.is_empty() {
        warn!("test partition is empty; held-out evaluation is skipped");
    }

    info!(
        classes = encoder.n_classes(),
        train = train.len(),
        validation = validation.len(),
        test = test.len(),
        "data prepared"
    );

    Ok(PreparedData {
        encoder,
        scaler,
        feature_names: dataset.feature_names.clone(),
        target: dataset.target_name.clone(),
        train,
        validation,
        test,
        test_indices: split.test,
    })
}
