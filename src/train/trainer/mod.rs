//! Trainer for the classifier
//!
//! Orchestrates the training loop:
//! - Single optimizer steps on a mini-batch
//! - Epoch-level training over a reshuffled partition
//! - Validation without parameter updates
//! - Multi-epoch `fit` with per-epoch logging

mod core;
mod epoch;
mod fit;
mod result;

pub use core::Trainer;
pub use result::TrainResult;
