//! Init command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{save_config, InitArgs, PipelineSpec};

/// Write the default configuration to `args.path`
///
/// Refuses to replace an existing file unless `--force` is given.
pub fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    if args.path.exists() && !args.force {
        return Err(format!(
            "{} already exists\n  → Pass --force to overwrite it",
            args.path.display()
        ));
    }

    save_config(&PipelineSpec::default(), &args.path).map_err(|e| format!("Failed to write config: {e}"))?;

    log(level, LogLevel::Normal, &format!("Default configuration saved to: {}", args.path.display()));
    Ok(())
}
