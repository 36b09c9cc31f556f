//! Training configuration and per-epoch history

use crate::config::TrainingParams;
use serde::{Deserialize, Serialize};

/// Training loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    /// Seed for per-epoch shuffling
    pub seed: u64,
    pub shuffle: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::from(&TrainingParams::default())
    }
}

impl From<&TrainingParams> for TrainConfig {
    fn from(params: &TrainingParams) -> Self {
        Self {
            epochs: params.epochs,
            batch_size: params.batch_size,
            seed: params.seed,
            shuffle: params.shuffle,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

/// Metrics recorded at the end of one epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// 1-based epoch number
    pub epoch: usize,
    pub loss: f32,
    pub accuracy: f32,
    pub val_loss: Option<f32>,
    pub val_accuracy: Option<f32>,
}

/// Per-epoch metrics of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainHistory {
    pub epochs: Vec<EpochRecord>,
    /// Optimizer steps taken
    pub steps: usize,
}

impl TrainHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: EpochRecord) {
        self.epochs.push(record);
    }

    pub fn last(&self) -> Option<&EpochRecord> {
        self.epochs.last()
    }

    /// Lowest finite training loss
    pub fn best_loss(&self) -> Option<f32> {
        self.epochs.iter().map(|r| r.loss).filter(|l| l.is_finite()).reduce(f32::min)
    }

    pub fn losses(&self) -> Vec<f32> {
        self.epochs.iter().map(|r| r.loss).collect()
    }

    pub fn val_losses(&self) -> Vec<f32> {
        self.epochs.iter().filter_map(|r| r.val_loss).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(epoch: usize, loss: f32, val_loss: Option<f32>) -> EpochRecord {
        EpochRecord { epoch, loss, accuracy: 0.5, val_loss, val_accuracy: val_loss.map(|_| 0.5) }
    }

    #[test]
    fn test_config_from_params() {
        let config = TrainConfig::default();
        assert_eq!(config.epochs, 50);
        assert_eq!(config.batch_size, 10);
        assert!(config.shuffle);

        let config = TrainConfig::new().with_epochs(3).with_batch_size(4).with_shuffle(false);
        assert_eq!((config.epochs, config.batch_size, config.shuffle), (3, 4, false));
    }

    #[test]
    fn test_history_best_loss_skips_nan() {
        let mut history = TrainHistory::new();
        history.record(record(1, 1.0, Some(1.1)));
        history.record(record(2, f32::NAN, None));
        history.record(record(3, 0.4, Some(0.6)));
        assert_eq!(history.best_loss(), Some(0.4));
        assert_eq!(history.val_losses(), vec![1.1, 0.6]);
        assert_eq!(history.last().map(|r| r.epoch), Some(3));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(TrainHistory::new().best_loss(), None);
    }
}
