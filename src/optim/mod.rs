//! Optimizers for training neural networks

mod adam;
mod optimizer;
mod sgd;

#[cfg(test)]
mod convergence_tests;

pub use adam::Adam;
pub use optimizer::{Optimizer, Param};
pub use sgd::SGD;

use crate::config::{OptimSpec, OptimizerKind};

/// Build the optimizer selected in the configuration
pub fn build_optimizer(spec: &OptimSpec) -> Box<dyn Optimizer> {
    match spec.name {
        OptimizerKind::Adam => Box::new(Adam::new(spec.lr, spec.beta1, spec.beta2, spec.epsilon)),
        OptimizerKind::Sgd => Box::new(SGD::new(spec.lr, spec.momentum)),
    }
}
