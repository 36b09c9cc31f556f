//! Optimizer trait

use ndarray::{ArrayViewD, ArrayViewMutD};

/// A trainable tensor paired with its gradient for one update
pub struct Param<'a> {
    pub value: ArrayViewMutD<'a, f32>,
    pub grad: ArrayViewD<'a, f32>,
}

impl<'a> Param<'a> {
    pub fn new(value: ArrayViewMutD<'a, f32>, grad: ArrayViewD<'a, f32>) -> Self {
        Self { value, grad }
    }
}

/// Trait for optimization algorithms
///
/// Parameters must be passed in the same order on every call; per-parameter
/// state (moments, velocities) is keyed by position.
pub trait Optimizer {
    /// Perform a single optimization step
    fn step(&mut self, params: &mut [Param<'_>]);

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);

    /// Short name for logs and metadata
    fn name(&self) -> &'static str;
}
