//! Training loop
//!
//! - Categorical cross-entropy over softmax outputs
//! - Accuracy metrics
//! - Mini-batch iteration with per-epoch reshuffling
//! - `Trainer` driving forward, backward and optimizer steps with
//!   per-epoch validation

mod batch;
mod config;
mod loss;
mod metrics;
mod trainer;


pub use batch::{batch_order, Batch};
pub use config::{EpochRecord, TrainConfig, TrainHistory};
pub use loss::{CategoricalCrossEntropy, LossFn, PROBABILITY_CLIP};
pub use metrics::{accuracy, categorical_accuracy};
pub use trainer::{TrainResult, Trainer};
