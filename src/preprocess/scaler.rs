//! Per-feature standardization

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Standard scaler: `x' = (x - mean) / scale`
///
/// `scale` is the population standard deviation (ddof = 0). Columns whose
/// standard deviation is below the zero-variance epsilon get `scale = 1.0`,
/// which maps them to `x - mean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl StandardScaler {
    /// Fit mean and scale on every row of `features`
    pub fn fit(features: ArrayView2<'_, f32>, zero_variance_epsilon: f32) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(Error::ShapeMismatch {
                expected: vec![1, features.ncols()],
                actual: vec![0, features.ncols()],
            });
        }

        // f64 accumulation keeps the moments accurate for large raw values
        let as_f64 = features.mapv(f64::from);
        let mean = as_f64.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(features.ncols()));
        let std = as_f64.std_axis(Axis(0), 0.0);

        let eps = f64::from(zero_variance_epsilon);
        let scale = std
            .iter()
            .map(|&s| if s.is_finite() && s > eps { s as f32 } else { 1.0 })
            .collect();

        Ok(Self { mean: mean.iter().map(|&m| m as f32).collect(), scale })
    }

    /// Rebuild a scaler from persisted statistics
    pub fn from_parts(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(Error::ShapeMismatch { expected: vec![mean.len()], actual: vec![scale.len()] });
        }
        Ok(Self { mean, scale })
    }

    /// Per-feature means
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Per-feature scales
    pub fn scale(&self) -> &[f32] {
        &self.scale
    }

    /// Number of features the scaler was fit on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize a rows × features matrix
    pub fn transform(&self, features: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        self.check_width(features.ncols())?;
        let mean = ArrayView1::from(&self.mean[..]);
        let scale = ArrayView1::from(&self.scale[..]);
        Ok((&features - &mean) / &scale)
    }

    /// Standardize a single sample
    pub fn transform_row(&self, row: &[f32]) -> Result<Vec<f32>> {
        self.check_width(row.len())?;
        Ok(row.iter().zip(&self.mean).zip(&self.scale).map(|((x, m), s)| (x - m) / s).collect())
    }

    fn check_width(&self, width: usize) -> Result<()> {
        if width != self.mean.len() {
            return Err(Error::ShapeMismatch { expected: vec![self.mean.len()], actual: vec![width] });
        }
        Ok(())
    }
}
