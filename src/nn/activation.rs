//! Activation functions

use ndarray::{Array2, ArrayView2, Axis, Zip};
use serde::{Deserialize, Serialize};

/// Layer activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// max(0, x)
    Relu,
    /// Row-wise normalized exponential
    Softmax,
    /// Identity
    Linear,
}

impl Activation {
    /// Apply to a batch of pre-activations (rows = samples)
    pub fn forward(self, z: ArrayView2<'_, f32>) -> Array2<f32> {
        match self {
            Self::Relu => z.mapv(|v| v.max(0.0)),
            Self::Softmax => softmax_rows(z),
            Self::Linear => z.to_owned(),
        }
    }

    /// Gradient w.r.t. pre-activations given the gradient w.r.t. outputs
    ///
    /// `z` are the pre-activations and `a` the activations of the same batch.
    pub fn backward(
        self,
        z: ArrayView2<'_, f32>,
        a: ArrayView2<'_, f32>,
        grad_out: ArrayView2<'_, f32>,
    ) -> Array2<f32> {
        match self {
            Self::Relu => {
                let mut grad = grad_out.to_owned();
                Zip::from(&mut grad).and(&z).for_each(|g, &zv| {
                    if zv <= 0.0 {
                        *g = 0.0;
                    }
                });
                grad
            }
            Self::Softmax => {
                // J^T g = a ⊙ (g - <g, a>)
                let dot = (&grad_out * &a).sum_axis(Axis(1)).insert_axis(Axis(1));
                &a * &(&grad_out - &dot)
            }
            Self::Linear => grad_out.to_owned(),
        }
    }

    /// Name used in exported metadata
    pub fn name(self) -> &'static str {
        match self {
            Self::Relu => "relu",
            Self::Softmax => "softmax",
            Self::Linear => "linear",
        }
    }
}

/// Numerically stable softmax over each row
pub fn softmax_rows(z: ArrayView2<'_, f32>) -> Array2<f32> {
    let mut out = z.to_owned();
    for mut row in out.rows_mut() {
        let max = row.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        if sum > 0.0 && sum.is_finite() {
            row.mapv_inplace(|v| v / sum);
        }
    }
    out
}
