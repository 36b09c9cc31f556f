//! Float vs. lite agreement check

use crate::config::ParitySpec;
use crate::inference::LiteModel;
use crate::nn::{argmax_rows, Mlp};
use crate::{Error, Result};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outcome of comparing the exported model with the float model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParityReport {
    pub samples: usize,
    /// Fraction of samples with the same arg-max class
    pub agreement: f32,
    /// Largest absolute difference between any two class probabilities
    pub max_probability_drift: f32,
}

/// Run both models on `x` (standardized rows) and compare
///
/// Fails with [`Error::ParityCheck`] when arg-max agreement is below
/// `spec.min_agreement`. Drift above `spec.probability_tolerance` is only
/// logged. No samples means vacuous agreement.
pub fn verify_parity(
    float_model: &Mlp,
    lite: &LiteModel,
    x: ArrayView2<'_, f32>,
    spec: &ParitySpec,
) -> Result<ParityReport> {
    let samples = x.nrows();
    if samples == 0 {
        warn!("no samples available for the parity check");
        return Ok(ParityReport { samples, agreement: 1.0, max_probability_drift: 0.0 });
    }

    let expected = float_model.forward(x)?;
    let actual = lite.predict_proba_scaled(x)?;

    let matches = argmax_rows(expected.view())
        .iter()
        .zip(argmax_rows(actual.view()))
        .filter(|(a, b)| **a == *b)
        .count();
    let agreement = matches as f32 / samples as f32;
    let max_probability_drift = expected
        .iter()
        .zip(actual.iter())
        .fold(0.0f32, |m, (a, b)| m.max((a - b).abs()));

    let report = ParityReport { samples, agreement, max_probability_drift };

    if agreement < spec.min_agreement {
        return Err(Error::ParityCheck { agreement, required: spec.min_agreement, samples });
    }
    if max_probability_drift > spec.probability_tolerance {
        warn!(
            max_probability_drift,
            tolerance = spec.probability_tolerance,
            "lite model probabilities drift from the float model"
        );
    }
    info!(samples, agreement, max_probability_drift, "lite model parity verified");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::metadata::tests::sample_metadata;
    use crate::export::{serialize_artifact, LayerInfo, LiteGraph};
    use crate::quant::QuantizationMode;
    use ndarray::Array2;

    fn lite_for(model: &Mlp, mode: QuantizationMode) -> LiteModel {
        let mut meta = sample_metadata();
        meta.layers = LayerInfo::describe(model);
        meta.quantization = mode;
        let bytes = serialize_artifact(&LiteGraph::from_mlp(model, mode), &meta).unwrap();
        LiteModel::from_bytes(&bytes).unwrap()
    }

    fn inputs() -> Array2<f32> {
        Array2::from_shape_fn((40, 6), |(i, j)| ((i * 7 + j * 3) % 11) as f32 / 5.0 - 1.0)
    }

    #[test]
    fn test_float32_export_agrees_exactly() {
        let model = Mlp::new(6, &[32, 16], 3, 42).unwrap();
        let lite = lite_for(&model, QuantizationMode::None);
        let report = verify_parity(&model, &lite, inputs().view(), &ParitySpec::default()).unwrap();
        assert_eq!(report.samples, 40);
        assert_eq!(report.agreement, 1.0);
        assert_eq!(report.max_probability_drift, 0.0);
    }

    fn biased_towards(class: usize) -> Mlp {
        let mut layers = Mlp::new(6, &[8], 3, 7).unwrap().layers().to_vec();
        let last = layers.len() - 1;
        layers[last].bias.fill(0.0);
        layers[last].bias[class] = 100.0;
        Mlp::from_layers(layers).unwrap()
    }

    #[test]
    fn test_disagreeing_model_fails_parity() {
        let model = biased_towards(1);
        let lite = lite_for(&biased_towards(0), QuantizationMode::None);
        let result = verify_parity(&model, &lite, inputs().view(), &ParitySpec::default());
        match result {
            Err(Error::ParityCheck { agreement, samples, .. }) => {
                assert_eq!(samples, 40);
                assert_eq!(agreement, 0.0);
            }
            other => panic!("expected parity failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_vacuous() {
        let model = Mlp::new(6, &[4], 3, 0).unwrap();
        let lite = lite_for(&model, QuantizationMode::DynamicInt8);
        let report = verify_parity(&model, &lite, Array2::zeros((0, 6)).view(), &ParitySpec::default()).unwrap();
        assert_eq!(report.agreement, 1.0);
    }
}
