//! Declarative pipeline configuration
//!
//! A [`PipelineSpec`] describes one run end to end: where the CSV lives, how
//! it is split and scaled, the network topology, optimizer hyperparameters and
//! how the lite artifact is written. Every field has a default, so running
//! without a config file trains the stock 6-32-16-k network for 50 epochs.

mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, Cli, Command, InitArgs, InspectArgs, OutputFormat, PredictArgs,
    TrainArgs, ValidateArgs,
};
pub use loader::{load_config, load_or_default, save_config};
pub use schema::{
    DataSpec, ExportSpec, ModelSpec, OptimSpec, OptimizerKind, ParitySpec, PipelineSpec,
    PreprocessSpec, SplitSpec, TrainingParams, DEFAULT_FEATURES, DEFAULT_TARGET,
};
pub use validate::{validate_config, ValidationError};
