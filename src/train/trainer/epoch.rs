//! Step and epoch-level training and validation

use super::core::Trainer;
use crate::nn::argmax_rows;
use crate::train::{batch_order, Batch};
use crate::Result;
use ndarray::ArrayView2;

fn count_correct(probs: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>) -> usize {
    argmax_rows(probs).iter().zip(argmax_rows(targets)).filter(|(p, t)| **p == *t).count()
}

impl Trainer {
    /// One optimizer step on a batch
    ///
    /// Returns the batch loss and the number of rows classified correctly
    /// before the update.
    pub fn train_step(&mut self, batch: &Batch) -> Result<(f32, usize)> {
        let cache = self.model.forward_cached(batch.inputs.view())?;
        let probs = cache.output();
        let loss = self.loss_fn.forward(probs, batch.targets.view());
        let correct = count_correct(probs, batch.targets.view());

        let grad = self.loss_fn.grad_logits(probs, batch.targets.view());
        let grads = self.model.backward(&cache, grad.view());
        let mut params = self.model.parameters_with_grads(&grads);
        self.optimizer.step(&mut params);
        self.history.steps += 1;

        Ok((loss, correct))
    }

    /// Train for one epoch
    ///
    /// Returns the sample-weighted mean loss and the accuracy over the epoch.
    pub fn train_epoch(
        &mut self,
        features: ArrayView2<'_, f32>,
        targets: ArrayView2<'_, f32>,
    ) -> Result<(f32, f32)> {
        let n = features.nrows();
        if n == 0 {
            return Ok((0.0, 0.0));
        }
        let batch_size = self.config.batch_size.max(1);
        let order = batch_order(n, self.config.shuffle, &mut self.rng);

        let mut total_loss = 0.0f32;
        let mut correct = 0usize;
        for rows in order.chunks(batch_size) {
            let batch = Batch::gather(features, targets, rows);
            let (loss, batch_correct) = self.train_step(&batch)?;
            total_loss += loss * rows.len() as f32;
            correct += batch_correct;
        }

        Ok((total_loss / n as f32, correct as f32 / n as f32))
    }

    /// Loss and accuracy on a dataset without updating parameters
    pub fn evaluate(&self, features: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>) -> Result<(f32, f32)> {
        if features.nrows() == 0 {
            return Ok((0.0, 0.0));
        }
        let probs = self.model.forward(features)?;
        let loss = self.loss_fn.forward(probs.view(), targets);
        let correct = count_correct(probs.view(), targets);
        Ok((loss, correct as f32 / features.nrows() as f32))
    }
}
