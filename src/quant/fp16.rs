//! Half-precision weight storage

use half::f16;

/// Round each value to the nearest IEEE binary16
pub fn quantize_f16(values: &[f32]) -> Vec<f16> {
    values.iter().map(|&v| f16::from_f32(v)).collect()
}

/// Widen binary16 values back to f32
pub fn dequantize_f16(values: &[f16]) -> Vec<f32> {
    values.iter().map(|v| v.to_f32()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_values_survive() {
        let values = [0.0f32, 1.0, -2.5, 0.125, 1024.0];
        assert_eq!(dequantize_f16(&quantize_f16(&values)), values.to_vec());
    }

    #[test]
    fn test_relative_error_is_small() {
        let values = [0.1f32, -0.3337, 3.14159, 1e-3];
        let restored = dequantize_f16(&quantize_f16(&values));
        for (a, b) in values.iter().zip(restored) {
            assert!(((a - b) / a).abs() < 1e-3);
        }
    }
}
