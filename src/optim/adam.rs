//! Adam optimizer

use super::{Optimizer, Param};
use ndarray::{ArrayD, Zip};

/// Adam with bias-corrected step size
///
/// m_t = β1·m + (1-β1)·g,  v_t = β2·v + (1-β2)·g²
/// θ_t = θ - lr·√(1-β2^t)/(1-β1^t) · m_t / (√v_t + ε)
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<Option<ArrayD<f32>>>,
    v: Vec<Option<ArrayD<f32>>>,
}

impl Adam {
    /// Create a new Adam optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// Keras defaults: β1 = 0.9, β2 = 0.999, ε = 1e-7
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-7)
    }

    /// Number of steps taken
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.t
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [Param<'_>]) {
        if self.m.len() < params.len() {
            self.m.resize(params.len(), None);
            self.v.resize(params.len(), None);
        }
        self.t += 1;

        let t = i32::try_from(self.t).unwrap_or(i32::MAX);
        let (beta1, beta2, epsilon) = (self.beta1, self.beta2, self.epsilon);
        let lr_t = self.lr * ((1.0 - beta2.powi(t)).sqrt() / (1.0 - beta1.powi(t)));

        for (i, param) in params.iter_mut().enumerate() {
            let shape = param.grad.raw_dim();
            let m = self.m[i].get_or_insert_with(|| ArrayD::zeros(shape.clone()));
            let v = self.v[i].get_or_insert_with(|| ArrayD::zeros(shape.clone()));
            if m.raw_dim() != shape {
                *m = ArrayD::zeros(shape.clone());
                *v = ArrayD::zeros(shape);
            }

            Zip::from(&mut param.value).and(m).and(v).and(&param.grad).for_each(
                |w, m, v, &g| {
                    *m = beta1 * *m + (1.0 - beta1) * g;
                    *v = beta2 * *v + (1.0 - beta2) * g * g;
                    *w -= lr_t * *m / (v.sqrt() + epsilon);
                },
            );
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn name(&self) -> &'static str {
        "adam"
    }
}
