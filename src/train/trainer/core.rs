//! Core Trainer struct and basic methods

use crate::nn::Mlp;
use crate::optim::Optimizer;
use crate::train::{CategoricalCrossEntropy, LossFn, TrainConfig, TrainHistory};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Drives forward, backward and optimizer steps for an [`Mlp`]
///
/// # Example
///
/// ```no_run
/// use matheal::nn::Mlp;
/// use matheal::optim::Adam;
/// use matheal::train::{TrainConfig, Trainer};
///
/// let model = Mlp::new(6, &[32, 16], 3, 42).unwrap();
/// let mut trainer = Trainer::new(model, Box::new(Adam::default_params(0.001)), TrainConfig::default());
/// // let result = trainer.fit(&train, Some(&validation))?;
/// ```
pub struct Trainer {
    pub(crate) model: Mlp,

    pub(crate) optimizer: Box<dyn Optimizer>,

    pub(crate) loss_fn: Box<dyn LossFn>,

    pub(crate) config: TrainConfig,

    /// Per-epoch metrics
    pub history: TrainHistory,

    /// Shuffling source, seeded from the config
    pub(crate) rng: StdRng,
}

impl Trainer {
    /// Create a trainer using categorical cross-entropy
    pub fn new(model: Mlp, optimizer: Box<dyn Optimizer>, config: TrainConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            model,
            optimizer,
            loss_fn: Box::new(CategoricalCrossEntropy),
            config,
            history: TrainHistory::new(),
            rng,
        }
    }

    /// Replace the loss function
    pub fn set_loss(&mut self, loss_fn: Box<dyn LossFn>) {
        self.loss_fn = loss_fn;
    }

    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    pub fn set_lr(&mut self, lr: f32) {
        self.optimizer.set_lr(lr);
    }

    pub fn model(&self) -> &Mlp {
        &self.model
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn optimizer_name(&self) -> &'static str {
        self.optimizer.name()
    }

    /// Consume the trainer, keeping the trained model
    pub fn into_model(self) -> Mlp {
        self.model
    }
}
