//! matheal CLI
//!
//! # Usage
//!
//! ```bash
//! # Train on data/data.csv and write model.tflite
//! matheal train
//!
//! # Train with overrides
//! matheal train --config matheal.yaml --epochs 100 --quantization float16
//!
//! # Classify one patient
//! matheal predict model.tflite --features 25,120,80,6.5,98,76
//! ```

use clap::Parser;
use matheal::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
