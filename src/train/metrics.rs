//! Classification accuracy

use crate::nn::argmax_rows;
use ndarray::ArrayView2;

/// Fraction of positions where `predicted == truth`
pub fn accuracy(predicted: &[usize], truth: &[usize]) -> f32 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = predicted.iter().zip(truth).filter(|(p, t)| p == t).count();
    correct as f32 / truth.len() as f32
}

/// Fraction of rows where arg-max(probs) == arg-max(one-hot targets)
pub fn categorical_accuracy(probs: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>) -> f32 {
    accuracy(&argmax_rows(probs), &argmax_rows(targets))
}
