//! CSV loading

use super::Dataset;
use crate::config::DataSpec;
use crate::{Error, Result};
use ndarray::Array2;
use std::io::Read;
use std::path::Path;

/// Load the dataset described by `spec`
///
/// Fails when the file is absent, a required column is missing, a feature
/// cell is not numeric, or there are no data rows.
pub fn load_csv(spec: &DataSpec) -> Result<Dataset> {
    let path = spec.path.as_path();
    if !path.exists() {
        return Err(Error::DataNotFound { path: path.to_path_buf() });
    }

    let file = std::fs::File::open(path)
        .map_err(|e| Error::io(format!("opening {}", path.display()), e))?;
    let dataset = parse_csv(file, path, spec)?;

    tracing::debug!(
        rows = dataset.len(),
        features = dataset.n_features(),
        path = %path.display(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Parse CSV content from any reader; `source` is used for diagnostics
pub fn parse_csv<R: Read>(reader: R, source: &Path, spec: &DataSpec) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(spec.delimiter as u8)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let csv_error = |e: csv::Error| Error::Csv { path: source.to_path_buf(), message: e.to_string() };

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let column_index = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
            path: source.to_path_buf(),
            required: required_columns(spec),
        })
    };

    let feature_idx: Vec<usize> =
        spec.features.iter().map(|f| column_index(f)).collect::<Result<_>>()?;
    let target_idx = column_index(&spec.target)?;

    let mut values: Vec<f32> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        for (&col, name) in feature_idx.iter().zip(&spec.features) {
            let raw = record.get(col).unwrap_or("");
            let invalid = || Error::InvalidValue {
                row: row + 1,
                column: name.clone(),
                value: raw.to_string(),
            };
            // NaN, inf and anything past f32::MAX are not measurements
            let value: f32 = raw.parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            values.push(value);
        }
        labels.push(record.get(target_idx).unwrap_or("").to_string());
    }

    if labels.is_empty() {
        return Err(Error::EmptyDataset { path: source.to_path_buf() });
    }

    let n_features = spec.features.len();
    let features = Array2::from_shape_vec((labels.len(), n_features), values).map_err(|_| {
        Error::ShapeMismatch { expected: vec![labels.len(), n_features], actual: vec![] }
    })?;

    Ok(Dataset {
        features,
        labels,
        feature_names: spec.features.clone(),
        target_name: spec.target.clone(),
        source: source.to_path_buf(),
    })
}

fn required_columns(spec: &DataSpec) -> String {
    spec.features.iter().chain(std::iter::once(&spec.target)).cloned().collect::<Vec<_>>().join(", ")
}
