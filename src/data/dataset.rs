//! In-memory dataset

use ndarray::{Array2, ArrayView1};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Feature matrix and labels read from one CSV file
///
/// Row `i` of `features` and `labels[i]` come from the same record; rows keep
/// file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// rows × features, columns in `feature_names` order
    pub features: Array2<f32>,
    /// Raw target value of each row
    pub labels: Vec<String>,
    /// Feature column names
    pub feature_names: Vec<String>,
    /// Target column name
    pub target_name: String,
    /// Where the data came from
    pub source: PathBuf,
}

impl Dataset {
    /// Number of records
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Feature values of record `idx`
    pub fn row(&self, idx: usize) -> ArrayView1<'_, f32> {
        self.features.row(idx)
    }

    /// Count of records per label, sorted by label
    pub fn class_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
