//! Conversion modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight representation chosen at conversion time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuantizationMode {
    /// int8 weights with one f32 scale per output channel
    #[default]
    DynamicInt8,
    /// IEEE half-precision weights
    Float16,
    /// Weights kept as f32
    None,
}

impl QuantizationMode {
    /// Bytes per stored weight element
    pub fn weight_bytes(self) -> usize {
        match self {
            Self::DynamicInt8 => 1,
            Self::Float16 => 2,
            Self::None => 4,
        }
    }

    /// Whether the artifact carries per-channel scale tensors
    pub fn has_scales(self) -> bool {
        matches!(self, Self::DynamicInt8)
    }
}

impl fmt::Display for QuantizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DynamicInt8 => write!(f, "dynamic_int8"),
            Self::Float16 => write!(f, "float16"),
            Self::None => write!(f, "none"),
        }
    }
}

impl FromStr for QuantizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "dynamic_int8" | "int8" | "dynamic" => Ok(Self::DynamicInt8),
            "float16" | "fp16" | "f16" => Ok(Self::Float16),
            "none" | "float32" | "f32" => Ok(Self::None),
            _ => Err(format!(
                "Invalid quantization mode: {s}. Valid modes: dynamic_int8, float16, none"
            )),
        }
    }
}
