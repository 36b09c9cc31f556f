//! Prediction results

use serde::{Deserialize, Serialize};

/// Classification of one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Arg-max output unit
    pub class_index: usize,
    /// Class name of `class_index`
    pub label: String,
    /// Softmax output, one entry per class in code order
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Probability of the predicted class
    pub fn confidence(&self) -> f32 {
        self.probabilities.get(self.class_index).copied().unwrap_or(0.0)
    }
}
