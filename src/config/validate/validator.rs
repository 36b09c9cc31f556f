//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::PipelineSpec;
use std::collections::HashSet;

/// Validate a pipeline specification
///
/// Checks numeric ranges, topology and column lists. File existence is left
/// to the load stage, which reports it with the offending path.
pub fn validate_config(spec: &PipelineSpec) -> Result<(), ValidationError> {
    let optim = &spec.optimizer;
    if !(optim.lr > 0.0 && optim.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(optim.lr));
    }
    for beta in [optim.beta1, optim.beta2] {
        if !(0.0..1.0).contains(&beta) {
            return Err(ValidationError::InvalidBeta(beta));
        }
    }
    if !(optim.epsilon > 0.0) {
        return Err(ValidationError::InvalidEpsilon(optim.epsilon));
    }
    if !(0.0..1.0).contains(&optim.momentum) {
        return Err(ValidationError::InvalidMomentum(optim.momentum));
    }

    if spec.training.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.training.batch_size));
    }
    if spec.training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(spec.training.epochs));
    }

    let test_fraction = spec.split.test_fraction;
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ValidationError::InvalidTestFraction(test_fraction));
    }
    if !(0.0..1.0).contains(&spec.split.validation_fraction) {
        return Err(ValidationError::InvalidValidationFraction(spec.split.validation_fraction));
    }

    if spec.model.hidden_units.is_empty() {
        return Err(ValidationError::EmptyHiddenLayers);
    }
    if let Some(idx) = spec.model.hidden_units.iter().position(|&u| u == 0) {
        return Err(ValidationError::ZeroWidthLayer(idx));
    }

    validate_columns(spec)?;

    if !(spec.preprocess.zero_variance_epsilon >= 0.0) {
        return Err(ValidationError::InvalidZeroVarianceEpsilon(
            spec.preprocess.zero_variance_epsilon,
        ));
    }

    let parity = &spec.export.parity;
    if !(0.0..=1.0).contains(&parity.min_agreement) {
        return Err(ValidationError::InvalidParityAgreement(parity.min_agreement));
    }
    if !(parity.probability_tolerance >= 0.0) {
        return Err(ValidationError::InvalidProbabilityTolerance(parity.probability_tolerance));
    }
    if spec.export.metadata_output == spec.export.output {
        return Err(ValidationError::SameOutputPaths(spec.export.metadata_output.clone()));
    }

    Ok(())
}

fn validate_columns(spec: &PipelineSpec) -> Result<(), ValidationError> {
    let data = &spec.data;
    if !data.delimiter.is_ascii() {
        return Err(ValidationError::InvalidDelimiter(data.delimiter));
    }
    if data.features.is_empty() {
        return Err(ValidationError::EmptyFeatures);
    }

    let mut seen = HashSet::new();
    for feature in &data.features {
        if feature.trim().is_empty() || !seen.insert(feature.as_str()) {
            return Err(ValidationError::InvalidFeatureColumn(feature.clone()));
        }
    }
    if seen.contains(data.target.as_str()) {
        return Err(ValidationError::TargetIsFeature(data.target.clone()));
    }
    Ok(())
}
