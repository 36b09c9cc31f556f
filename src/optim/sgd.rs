//! Stochastic Gradient Descent optimizer

use super::{Optimizer, Param};
use ndarray::{ArrayD, Zip};

/// SGD optimizer with optional momentum
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocities: Vec<Option<ArrayD<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self { lr, momentum, velocities: Vec::new() }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Param<'_>]) {
        let lr = self.lr;

        if self.momentum <= 0.0 {
            // param -= lr * grad
            for param in params.iter_mut() {
                param.value.scaled_add(-lr, &param.grad);
            }
            return;
        }

        if self.velocities.len() < params.len() {
            self.velocities.resize(params.len(), None);
        }
        let momentum = self.momentum;

        for (i, param) in params.iter_mut().enumerate() {
            let shape = param.grad.raw_dim();
            let velocity = self.velocities[i].get_or_insert_with(|| ArrayD::zeros(shape.clone()));
            if velocity.raw_dim() != shape {
                *velocity = ArrayD::zeros(shape);
            }

            // v = momentum * v - lr * grad; param += v
            Zip::from(&mut param.value).and(velocity).and(&param.grad).for_each(|w, v, &g| {
                *v = momentum * *v - lr * g;
                *w += *v;
            });
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_plain_step() {
        let mut sgd = SGD::new(0.1, 0.0);
        let mut value = arr1(&[1.0f32, 2.0]).into_dyn();
        let grad = arr1(&[1.0f32, -2.0]).into_dyn();
        sgd.step(&mut [Param::new(value.view_mut(), grad.view())]);
        assert_relative_eq!(value[0], 0.9);
        assert_relative_eq!(value[1], 2.2);
    }

    #[test]
    fn test_momentum_accumulates() {
        let mut sgd = SGD::new(0.1, 0.9);
        let mut value = arr1(&[0.0f32]).into_dyn();
        let grad = arr1(&[1.0f32]).into_dyn();

        sgd.step(&mut [Param::new(value.view_mut(), grad.view())]);
        assert_relative_eq!(value[0], -0.1);
        // v = 0.9 * -0.1 - 0.1 = -0.19
        sgd.step(&mut [Param::new(value.view_mut(), grad.view())]);
        assert_relative_eq!(value[0], -0.29, epsilon = 1e-6);
    }
}
