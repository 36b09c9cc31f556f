//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::PipelineSpec;
use crate::quant::QuantizationMode;

/// matheal: maternal health risk classifier training and lite export
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "matheal")]
#[command(version)]
#[command(
    about = "Train a maternal health risk classifier and export a quantized lite model"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the full pipeline: load, prepare, train, evaluate, export
    Train(TrainArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Write the default configuration as YAML
    Init(InitArgs),

    /// Classify one sample with an exported lite model
    Predict(PredictArgs),

    /// Show metadata and tensors of an exported lite model
    Inspect(InspectArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct TrainArgs {
    /// Path to YAML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Override input CSV path
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Override lite artifact output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override learning rate
    #[arg(short, long)]
    pub lr: Option<f32>,

    /// Random seed for split, init and shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override weight quantization (dynamic_int8, float16, none)
    #[arg(long)]
    pub quantization: Option<QuantizationMode>,

    /// Dry run (validate config but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Print the resolved configuration
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Where to write the config
    #[arg(value_name = "PATH", default_value = "matheal.yaml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the predict command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    /// Lite artifact to load
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Raw feature values in model input order, comma separated
    /// (Age,SystolicBP,DiastolicBP,BS,BodyTemp,HeartRate)
    #[arg(short, long, value_delimiter = ',', num_args = 1.., allow_hyphen_values = true)]
    pub features: Vec<f32>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Lite artifact to inspect
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a PipelineSpec
///
/// `--seed` drives both the split permutation and training randomness.
pub fn apply_overrides(spec: &mut PipelineSpec, args: &TrainArgs) {
    if let Some(data) = &args.data {
        spec.data.path = data.clone();
    }
    if let Some(output) = &args.output {
        spec.export.metadata_output = output.with_extension("meta.json");
        spec.export.output = output.clone();
    }
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(batch_size) = args.batch_size {
        spec.training.batch_size = batch_size;
    }
    if let Some(lr) = args.lr {
        spec.optimizer.lr = lr;
    }
    if let Some(seed) = args.seed {
        spec.split.seed = seed;
        spec.training.seed = seed;
    }
    if let Some(mode) = args.quantization {
        spec.export.quantization = mode;
    }
}
