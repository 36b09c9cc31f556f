//! Multi-epoch training loop

use super::core::Trainer;
use super::result::TrainResult;
use crate::preprocess::Partition;
use crate::train::EpochRecord;
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info, warn};

impl Trainer {
    /// Train for the configured number of epochs, evaluating on
    /// `validation` (when non-empty) after each one
    ///
    /// A non-finite loss is reported but does not stop training.
    pub fn fit(&mut self, train: &Partition, validation: Option<&Partition>) -> Result<TrainResult> {
        if train.is_empty() {
            return Err(Error::config_value(
                "split",
                "the training partition is empty",
                "Lower split.test_fraction / split.validation_fraction or provide more rows",
            ));
        }
        let validation = validation.filter(|v| !v.is_empty());
        let epochs = self.config.epochs;
        let start = Instant::now();

        info!(
            train = train.len(),
            validation = validation.map_or(0, Partition::len),
            epochs,
            batch_size = self.config.batch_size,
            optimizer = self.optimizer.name(),
            params = self.model.n_params(),
            "starting training"
        );

        for epoch in 1..=epochs {
            let (loss, accuracy) = self.train_epoch(train.features.view(), train.targets.view())?;
            let val = match validation {
                Some(v) => Some(self.evaluate(v.features.view(), v.targets.view())?),
                None => None,
            };

            if !loss.is_finite() {
                warn!(epoch, loss, "training loss is not finite; check the input data for NaN or extreme values");
            }

            match val {
                Some((val_loss, val_accuracy)) => info!(
                    "Epoch {epoch}/{epochs}: loss={loss:.4} accuracy={accuracy:.4} val_loss={val_loss:.4} val_accuracy={val_accuracy:.4}"
                ),
                None => info!("Epoch {epoch}/{epochs}: loss={loss:.4} accuracy={accuracy:.4}"),
            }

            self.history.record(EpochRecord {
                epoch,
                loss,
                accuracy,
                val_loss: val.map(|(l, _)| l),
                val_accuracy: val.map(|(_, a)| a),
            });
        }

        let elapsed_secs = start.elapsed().as_secs_f64();
        debug!(elapsed_secs, steps = self.history.steps, "training finished");

        let last = self.history.last();
        Ok(TrainResult {
            final_epoch: last.map_or(0, |r| r.epoch),
            final_loss: last.map_or(f32::NAN, |r| r.loss),
            final_accuracy: last.map_or(0.0, |r| r.accuracy),
            best_loss: self.history.best_loss().unwrap_or(f32::NAN),
            val_loss: last.and_then(|r| r.val_loss),
            val_accuracy: last.and_then(|r| r.val_accuracy),
            steps: self.history.steps,
            elapsed_secs,
        })
    }
}
