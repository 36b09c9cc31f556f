//! Train command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_or_default, validate_config, PipelineSpec, TrainArgs};
use crate::pipeline::run_pipeline;

/// One-line-per-setting summary of what a run would do
pub fn format_plan(spec: &PipelineSpec) -> String {
    let hidden: Vec<String> = spec.model.hidden_units.iter().map(ToString::to_string).collect();
    [
        format!("  Data: {}", spec.data.path.display()),
        format!("  Features: {}", spec.data.features.join(", ")),
        format!("  Target: {}", spec.data.target),
        format!(
            "  Split: test {}, validation {}, seed {}",
            spec.split.test_fraction, spec.split.validation_fraction, spec.split.seed
        ),
        format!("  Hidden layers: [{}]", hidden.join(", ")),
        format!("  Optimizer: {} (lr={})", spec.optimizer.name, spec.optimizer.lr),
        format!("  Epochs: {}", spec.training.epochs),
        format!("  Batch size: {}", spec.training.batch_size),
        format!("  Quantization: {}", spec.export.quantization),
        format!("  Output: {}", spec.export.output.display()),
    ]
    .join("\n")
}

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    let mut spec = load_or_default(args.config.as_deref()).map_err(|e| format!("Config error: {e}"))?;

    // Apply command-line overrides
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Invalid override: {e}"))?;

    match &args.config {
        Some(path) => log(level, LogLevel::Normal, &format!("matheal: training from {}", path.display())),
        None => log(level, LogLevel::Normal, "matheal: training with default configuration"),
    }

    if args.dry_run {
        log(level, LogLevel::Normal, "Dry run - config validated successfully");
        log(level, LogLevel::Verbose, &format_plan(&spec));
        return Ok(());
    }

    let report = run_pipeline(&spec).map_err(|e| format!("Training error: {e}"))?;

    log(level, LogLevel::Normal, &report.to_string());
    log(level, LogLevel::Normal, "Training complete!");
    Ok(())
}
