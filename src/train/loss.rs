//! Loss functions for training

use ndarray::{Array2, ArrayView2};

/// Probabilities are clipped to `[clip, 1 - clip]` before the logarithm
pub const PROBABILITY_CLIP: f32 = 1e-7;

/// Trait for loss functions over class probabilities
pub trait LossFn {
    /// Mean loss over the batch
    fn forward(&self, probs: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>) -> f32;

    /// Gradient of the mean loss w.r.t. the logits feeding the softmax
    fn grad_logits(&self, probs: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>) -> Array2<f32>;

    /// Name of the loss function
    fn name(&self) -> &str;
}

/// Categorical cross-entropy on softmax outputs and one-hot targets
///
/// L = -mean_i sum_k t_ik · ln(clip(p_ik))
///
/// # Example
///
/// ```
/// use matheal::train::{CategoricalCrossEntropy, LossFn};
/// use ndarray::array;
///
/// let probs = array![[0.7f32, 0.2, 0.1]];
/// let targets = array![[1.0f32, 0.0, 0.0]];
/// let loss = CategoricalCrossEntropy.forward(probs.view(), targets.view());
/// assert!((loss - 0.7f32.ln().abs()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalCrossEntropy;

impl LossFn for CategoricalCrossEntropy {
    fn forward(&self, probs: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>) -> f32 {
        let n = probs.nrows();
        if n == 0 {
            return 0.0;
        }
        let total: f32 = probs
            .iter()
            .zip(targets.iter())
            .filter(|(_, &t)| t != 0.0)
            .map(|(&p, &t)| -t * p.clamp(PROBABILITY_CLIP, 1.0 - PROBABILITY_CLIP).ln())
            .sum();
        total / n as f32
    }

    fn grad_logits(&self, probs: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>) -> Array2<f32> {
        // softmax + cross-entropy: dL/dz = (p - t) / batch
        let n = probs.nrows().max(1) as f32;
        (&probs - &targets) / n
    }

    fn name(&self) -> &str {
        "categorical_crossentropy"
    }
}
