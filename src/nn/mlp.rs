//! Multi-layer perceptron classifier

use super::{Activation, Dense, DenseGrads};
use crate::optim::Param;
use crate::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Sequential stack of dense layers ending in a softmax over the classes
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    layers: Vec<Dense>,
}

/// Intermediate values of a forward pass, kept for backpropagation
#[derive(Debug, Clone)]
pub struct ForwardCache {
    /// Input of each layer
    inputs: Vec<Array2<f32>>,
    /// Pre-activations of each layer
    pre: Vec<Array2<f32>>,
    /// Activations of each layer
    outputs: Vec<Array2<f32>>,
}

impl ForwardCache {
    /// Final layer activations (class probabilities)
    pub fn output(&self) -> ArrayView2<'_, f32> {
        self.outputs.last().map_or_else(|| self.inputs[0].view(), Array2::view)
    }

    /// Final layer pre-activations
    pub fn logits(&self) -> ArrayView2<'_, f32> {
        self.pre.last().map_or_else(|| self.inputs[0].view(), Array2::view)
    }
}

impl Mlp {
    /// ReLU hidden layers of the given widths followed by a softmax layer
    /// with one unit per class. Weights are Glorot-uniform from `seed`.
    pub fn new(input_dim: usize, hidden_units: &[usize], n_classes: usize, seed: u64) -> Result<Self> {
        if input_dim == 0 || n_classes == 0 || hidden_units.contains(&0) {
            return Err(Error::config_value(
                "model.hidden_units",
                format!(
                    "cannot build a network with input {input_dim}, hidden {hidden_units:?}, output {n_classes}"
                ),
                "Every layer needs at least one unit",
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut layers = Vec::with_capacity(hidden_units.len() + 1);
        let mut width = input_dim;
        for &units in hidden_units {
            layers.push(Dense::glorot(width, units, Activation::Relu, &mut rng));
            width = units;
        }
        layers.push(Dense::glorot(width, n_classes, Activation::Softmax, &mut rng));

        Ok(Self { layers })
    }

    /// Assemble from existing layers, checking that widths chain
    pub fn from_layers(layers: Vec<Dense>) -> Result<Self> {
        if layers.is_empty() {
            return Err(Error::ShapeMismatch { expected: vec![1], actual: vec![0] });
        }
        for pair in layers.windows(2) {
            if pair[0].out_dim() != pair[1].in_dim() {
                return Err(Error::ShapeMismatch {
                    expected: vec![pair[0].out_dim()],
                    actual: vec![pair[1].in_dim()],
                });
            }
        }
        for layer in &layers {
            if layer.bias.len() != layer.out_dim() {
                return Err(Error::ShapeMismatch {
                    expected: vec![layer.out_dim()],
                    actual: vec![layer.bias.len()],
                });
            }
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub fn input_dim(&self) -> usize {
        self.layers[0].in_dim()
    }

    pub fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].out_dim()
    }

    /// Total trainable parameters
    pub fn n_params(&self) -> usize {
        self.layers.iter().map(Dense::n_params).sum()
    }

    fn check_input(&self, x: &ArrayView2<'_, f32>) -> Result<()> {
        if x.ncols() != self.input_dim() {
            return Err(Error::ShapeMismatch {
                expected: vec![x.nrows(), self.input_dim()],
                actual: vec![x.nrows(), x.ncols()],
            });
        }
        Ok(())
    }

    /// Class probabilities for a batch
    pub fn forward(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        self.check_input(&x)?;
        let mut activ = x.to_owned();
        for layer in &self.layers {
            activ = layer.forward(activ.view());
        }
        Ok(activ)
    }

    /// Forward pass retaining every layer's input and pre-activation
    pub fn forward_cached(&self, x: ArrayView2<'_, f32>) -> Result<ForwardCache> {
        self.check_input(&x)?;
        let n = self.layers.len();
        let mut cache = ForwardCache {
            inputs: Vec::with_capacity(n),
            pre: Vec::with_capacity(n),
            outputs: Vec::with_capacity(n),
        };

        let mut activ = x.to_owned();
        for layer in &self.layers {
            let z = layer.pre_activation(activ.view());
            let a = layer.activation.forward(z.view());
            cache.inputs.push(activ);
            cache.pre.push(z);
            activ = a.clone();
            cache.outputs.push(a);
        }
        Ok(cache)
    }

    /// Backpropagate a gradient taken w.r.t. the final layer's
    /// pre-activations (the logits). Returns one gradient per layer.
    pub fn backward(&self, cache: &ForwardCache, grad_logits: ArrayView2<'_, f32>) -> Vec<DenseGrads> {
        let last = self.layers.len() - 1;
        let mut grads = Vec::with_capacity(self.layers.len());
        let mut grad_out = grad_logits.to_owned();

        for (i, layer) in self.layers.iter().enumerate().rev() {
            let grad_pre = if i == last {
                grad_out
            } else {
                layer.activation.backward(cache.pre[i].view(), cache.outputs[i].view(), grad_out.view())
            };
            let (layer_grads, grad_input) = layer.backward(cache.inputs[i].view(), grad_pre.view());
            grads.push(layer_grads);
            grad_out = grad_input;
        }

        grads.reverse();
        grads
    }

    /// Pair each weight and bias with its gradient for an optimizer step
    pub fn parameters_with_grads<'a>(&'a mut self, grads: &'a [DenseGrads]) -> Vec<Param<'a>> {
        self.layers
            .iter_mut()
            .zip(grads)
            .flat_map(|(layer, grad)| {
                let Dense { weight, bias, .. } = layer;
                [
                    Param::new(weight.view_mut().into_dyn(), grad.weight.view().into_dyn()),
                    Param::new(bias.view_mut().into_dyn(), grad.bias.view().into_dyn()),
                ]
            })
            .collect()
    }

    /// Arg-max class index per row
    pub fn predict_classes(&self, x: ArrayView2<'_, f32>) -> Result<Vec<usize>> {
        Ok(argmax_rows(self.forward(x)?.view()))
    }
}

/// Index of the largest value in each row; ties resolve to the first index
pub fn argmax_rows(values: ArrayView2<'_, f32>) -> Vec<usize> {
    values
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |(best, best_v), (i, &v)| {
                    if v > best_v {
                        (i, v)
                    } else {
                        (best, best_v)
                    }
                })
                .0
        })
        .collect()
}
