//! Symmetric per-channel int8 quantization

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Largest stored magnitude; the range is symmetric `[-127, 127]`
pub const INT8_MAX: f32 = 127.0;

/// Scales never drop below this so all-zero channels stay representable
const MIN_SCALE: f32 = 1e-10;

/// A `[channels, channel_len]` matrix stored as int8 with one scale per row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantizedInt8 {
    /// Row-major int8 values
    pub data: Vec<i8>,
    /// One scale per channel (row)
    pub scales: Vec<f32>,
    pub channels: usize,
    pub channel_len: usize,
}

/// Quantize each row of `weights` independently
///
/// `scale = max|w| / 127`, `q = clamp(round(w / scale), -127, 127)`
pub fn quantize_per_channel(weights: ArrayView2<'_, f32>) -> QuantizedInt8 {
    let (channels, channel_len) = weights.dim();
    let mut scales = Vec::with_capacity(channels);
    let mut data = Vec::with_capacity(channels * channel_len);

    for row in weights.rows() {
        let max_abs = row.iter().fold(0.0f32, |m, v| m.max(v.abs()));
        let scale = if max_abs < MIN_SCALE { MIN_SCALE } else { max_abs / INT8_MAX };
        scales.push(scale);
        data.extend(row.iter().map(|&v| (v / scale).round().clamp(-INT8_MAX, INT8_MAX) as i8));
    }

    QuantizedInt8 { data, scales, channels, channel_len }
}

impl QuantizedInt8 {
    /// Reconstruct `[channels, channel_len]` f32 values
    pub fn dequantize(&self) -> Array2<f32> {
        let len = self.channel_len.max(1);
        let values: Vec<f32> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, &q)| f32::from(q) * self.scales.get(i / len).copied().unwrap_or(1.0))
            .collect();
        Array2::from_shape_vec((self.channels, self.channel_len), values)
            .unwrap_or_else(|_| Array2::zeros((self.channels, self.channel_len)))
    }

    /// Stored size: int8 data plus f32 scales
    pub fn memory_bytes(&self) -> usize {
        self.data.len() + self.scales.len() * 4
    }

    /// Size reduction vs f32 storage
    pub fn compression_ratio(&self) -> f32 {
        let original = self.data.len() * 4;
        original as f32 / self.memory_bytes().max(1) as f32
    }

    /// Largest absolute reconstruction error against `original`
    pub fn max_abs_error(&self, original: ArrayView2<'_, f32>) -> f32 {
        let restored = self.dequantize();
        restored
            .iter()
            .zip(original.iter())
            .fold(0.0f32, |m, (a, b)| m.max((a - b).abs()))
    }
}
