//! Training and evaluation stages

use super::prepare::PreparedData;
use crate::config::PipelineSpec;
use crate::eval::ClassificationReport;
use crate::nn::{argmax_rows, Mlp};
use crate::optim::build_optimizer;
use crate::train::{CategoricalCrossEntropy, LossFn, TrainConfig, TrainHistory, TrainResult, Trainer};
use crate::Result;
use tracing::{info, warn};

/// Fitted network with how it got there
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub model: Mlp,
    pub history: TrainHistory,
    pub result: TrainResult,
    /// Optimizer name, e.g. `adam`
    pub optimizer: String,
    pub learning_rate: f32,
}

/// Build the network from `spec.model` and fit it on the training partition,
/// validating on the validation partition after every epoch
pub fn train(prepared: &PreparedData, spec: &PipelineSpec) -> Result<TrainedModel> {
    let model = Mlp::new(
        prepared.n_features(),
        &spec.model.hidden_units,
        prepared.n_classes(),
        spec.training.seed,
    )?;
    info!(
        layers = model.layers().len(),
        params = model.n_params(),
        optimizer = %spec.optimizer.name,
        lr = spec.optimizer.lr,
        "model built"
    );

    let mut trainer = Trainer::new(
        model,
        build_optimizer(&spec.optimizer),
        TrainConfig::from(&spec.training),
    );
    let result = trainer.fit(&prepared.train, Some(&prepared.validation))?;

    let optimizer = trainer.optimizer_name().to_string();
    let learning_rate = trainer.lr();
    let history = std::mem::take(&mut trainer.history);
    info!(
        final_loss = result.final_loss,
        final_accuracy = result.final_accuracy,
        elapsed_secs = result.elapsed_secs,
        "training finished"
    );

    Ok(TrainedModel { model: trainer.into_model(), history, result, optimizer, learning_rate })
}

/// Score the trained model on the test partition
///
/// Returns `None` when the test partition is empty.
pub fn evaluate(trained: &TrainedModel, prepared: &PreparedData) -> Result<Option<ClassificationReport>> {
    let test = &prepared.test;
    if test.is_empty() {
        warn!("skipping evaluation: no test rows");
        return Ok(None);
    }
    info!(rows = test.len(), "evaluating on held-out test partition");

    let probs = trained.model.forward(test.features.view())?;
    let loss = CategoricalCrossEntropy.forward(probs.view(), test.targets.view());
    let predicted = argmax_rows(probs.view());
    let report = ClassificationReport::new(&predicted, &test.codes, prepared.encoder.classes())?.with_loss(loss);

    info!(loss, accuracy = report.accuracy, macro_f1 = report.macro_f1, "evaluation finished");
    info!("held-out classification report\n{report}");
    Ok(Some(report))
}
