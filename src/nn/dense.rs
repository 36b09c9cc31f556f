//! Fully connected layer

use super::Activation;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;

/// Dense layer: `activation(x · weight + bias)`
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    /// `[in, out]`
    pub weight: Array2<f32>,
    /// `[out]`
    pub bias: Array1<f32>,
    pub activation: Activation,
}

/// Gradients of one dense layer
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrads {
    pub weight: Array2<f32>,
    pub bias: Array1<f32>,
}

impl Dense {
    /// Glorot-uniform weights, zero bias
    pub fn glorot<R: Rng>(in_dim: usize, out_dim: usize, activation: Activation, rng: &mut R) -> Self {
        let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
        let weight = Array2::from_shape_fn((in_dim, out_dim), |_| rng.gen_range(-limit..=limit));
        Self { weight, bias: Array1::zeros(out_dim), activation }
    }

    /// Build from explicit parameters
    pub fn from_parts(weight: Array2<f32>, bias: Array1<f32>, activation: Activation) -> Self {
        Self { weight, bias, activation }
    }

    /// Input width
    pub fn in_dim(&self) -> usize {
        self.weight.nrows()
    }

    /// Output width
    pub fn out_dim(&self) -> usize {
        self.weight.ncols()
    }

    /// Trainable parameter count
    pub fn n_params(&self) -> usize {
        self.weight.len() + self.bias.len()
    }

    /// Pre-activations `x · W + b`
    pub fn pre_activation(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        x.dot(&self.weight) + &self.bias
    }

    /// Activated outputs
    pub fn forward(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        self.activation.forward(self.pre_activation(x).view())
    }

    /// Parameter gradients and the gradient w.r.t. this layer's input,
    /// given the gradient w.r.t. its pre-activations
    pub fn backward(
        &self,
        input: ArrayView2<'_, f32>,
        grad_pre: ArrayView2<'_, f32>,
    ) -> (DenseGrads, Array2<f32>) {
        let weight = input.t().dot(&grad_pre);
        let bias = grad_pre.sum_axis(Axis(0));
        let grad_input = grad_pre.dot(&self.weight.t());
        (DenseGrads { weight, bias }, grad_input)
    }
}
