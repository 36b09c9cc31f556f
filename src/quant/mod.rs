//! Post-training weight quantization
//!
//! - Symmetric per-output-channel int8 (dynamic-range quantization)
//! - Half-precision float16
//!
//! Biases are never quantized; activations stay f32 at inference time.

mod fp16;
mod int8;
mod mode;

pub use fp16::{dequantize_f16, quantize_f16};
pub use int8::{quantize_per_channel, QuantizedInt8, INT8_MAX};
pub use mode::QuantizationMode;
