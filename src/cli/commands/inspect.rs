//! Inspect command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{InspectArgs, OutputFormat};
use crate::inference::ArtifactSummary;

pub fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, &format!("Inspecting: {}", args.artifact.display()));

    let bytes = std::fs::read(&args.artifact)
        .map_err(|e| format!("Failed to read {}: {e}", args.artifact.display()))?;
    let summary = ArtifactSummary::from_bytes(&bytes).map_err(|e| format!("Failed to parse artifact: {e}"))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => println!("{summary}"),
    }
    Ok(())
}
