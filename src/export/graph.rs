//! Frozen inference graph

use crate::nn::{Activation, Mlp};
use crate::quant::{dequantize_f16, quantize_f16, quantize_per_channel, QuantizationMode, QuantizedInt8};
use half::f16;
use ndarray::{Array1, Array2};

/// Stored weights of one fully-connected op, logically `[out, in]`
#[derive(Debug, Clone, PartialEq)]
pub enum LiteWeights {
    Int8(QuantizedInt8),
    Float16 { values: Vec<f16>, shape: (usize, usize) },
    Float32(Array2<f32>),
}

impl LiteWeights {
    /// `(out, in)`
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Int8(q) => (q.channels, q.channel_len),
            Self::Float16 { shape, .. } => *shape,
            Self::Float32(w) => w.dim(),
        }
    }

    /// f32 weights `[out, in]` as the runtime sees them
    pub fn dequantize(&self) -> Array2<f32> {
        match self {
            Self::Int8(q) => q.dequantize(),
            Self::Float16 { values, shape } => Array2::from_shape_vec(*shape, dequantize_f16(values))
                .unwrap_or_else(|_| Array2::zeros(*shape)),
            Self::Float32(w) => w.clone(),
        }
    }

    /// Stored size in bytes, including int8 scales
    pub fn stored_bytes(&self) -> usize {
        match self {
            Self::Int8(q) => q.memory_bytes(),
            Self::Float16 { values, .. } => values.len() * 2,
            Self::Float32(w) => w.len() * 4,
        }
    }
}

/// One fully-connected op with fused activation
#[derive(Debug, Clone, PartialEq)]
pub struct LiteLayer {
    pub weights: LiteWeights,
    pub bias: Array1<f32>,
    pub activation: Activation,
}

/// Ordered fully-connected ops ending in softmax
#[derive(Debug, Clone, PartialEq)]
pub struct LiteGraph {
    pub layers: Vec<LiteLayer>,
    pub quantization: QuantizationMode,
}

impl LiteGraph {
    /// Freeze a trained network, transposing weights to `[out, in]` and
    /// applying the requested weight quantization
    pub fn from_mlp(model: &Mlp, quantization: QuantizationMode) -> Self {
        let layers = model
            .layers()
            .iter()
            .map(|dense| {
                let transposed = dense.weight.t().as_standard_layout().into_owned();
                let weights = match quantization {
                    QuantizationMode::DynamicInt8 => LiteWeights::Int8(quantize_per_channel(transposed.view())),
                    QuantizationMode::Float16 => {
                        let shape = transposed.dim();
                        let values = quantize_f16(&transposed.iter().copied().collect::<Vec<_>>());
                        LiteWeights::Float16 { values, shape }
                    }
                    QuantizationMode::None => LiteWeights::Float32(transposed),
                };
                LiteLayer { weights, bias: dense.bias.clone(), activation: dense.activation }
            })
            .collect();

        Self { layers, quantization }
    }

    /// Bytes of all stored weight and bias tensors
    pub fn stored_bytes(&self) -> usize {
        self.layers.iter().map(|l| l.weights.stored_bytes() + l.bias.len() * 4).sum()
    }

    /// Bytes the same tensors take as f32
    pub fn float_bytes(&self) -> usize {
        self.layers
            .iter()
            .map(|l| {
                let (out, inp) = l.weights.shape();
                (out * inp + l.bias.len()) * 4
            })
            .sum()
    }
}
