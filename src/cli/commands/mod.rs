//! CLI command implementations

mod init;
mod inspect;
mod predict;
mod train;
mod validate;


use crate::cli::{init_tracing, LogLevel};
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);
    init_tracing(log_level);

    match cli.command {
        Command::Train(args) => train::run_train(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Init(args) => init::run_init(args, log_level),
        Command::Predict(args) => predict::run_predict(args, log_level),
        Command::Inspect(args) => inspect::run_inspect(args, log_level),
    }
}
