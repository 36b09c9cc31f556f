//! Predict command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{OutputFormat, PredictArgs};
use crate::inference::{LiteModel, Prediction};

/// Human-readable prediction with per-class probabilities
pub fn format_prediction(prediction: &Prediction, labels: &[String]) -> String {
    let mut lines = vec![format!(
        "Prediction: {} ({:.2}%)",
        prediction.label,
        prediction.confidence() * 100.0
    )];
    for (label, p) in labels.iter().zip(&prediction.probabilities) {
        lines.push(format!("  {label:<12} {p:.4}"));
    }
    lines.join("\n")
}

pub fn run_predict(args: PredictArgs, level: LogLevel) -> Result<(), String> {
    let model = LiteModel::load(&args.artifact).map_err(|e| format!("Failed to load model: {e}"))?;
    log(
        level,
        LogLevel::Verbose,
        &format!("Loaded {} ({})", args.artifact.display(), model.metadata().quantization),
    );

    let prediction = model.predict_raw(&args.features).map_err(|e| format!("Prediction failed: {e}"))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&prediction).map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => println!("{}", format_prediction(&prediction, model.labels())),
    }
    Ok(())
}
