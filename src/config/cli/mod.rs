//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! matheal train
//! matheal train --config matheal.yaml --epochs 100
//! matheal validate matheal.yaml
//! matheal predict model.tflite --features 25,120,80,6.5,98,76
//! matheal inspect model.tflite --format json
//! ```

mod core;
mod types;


pub use core::{
    apply_overrides, parse_args, Cli, Command, InitArgs, InspectArgs, PredictArgs, TrainArgs,
    ValidateArgs,
};
pub use types::OutputFormat;
