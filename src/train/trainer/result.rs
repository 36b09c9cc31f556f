//! Training result types

use serde::{Deserialize, Serialize};

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainResult {
    /// Final epoch reached
    pub final_epoch: usize,
    /// Final training loss
    pub final_loss: f32,
    /// Final training accuracy
    pub final_accuracy: f32,
    /// Best training loss achieved
    pub best_loss: f32,
    /// Validation loss after the final epoch
    pub val_loss: Option<f32>,
    /// Validation accuracy after the final epoch
    pub val_accuracy: Option<f32>,
    /// Optimizer steps taken
    pub steps: usize,
    /// Total training time in seconds
    pub elapsed_secs: f64,
}
