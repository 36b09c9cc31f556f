//! matheal: maternal health risk classifier
//!
//! Trains a small fully-connected network on tabular vital signs (age, blood
//! pressure, blood sugar, body temperature, heart rate) to predict a risk
//! category, then exports a compact, optionally quantized lite model that
//! carries its own label names and feature scaler.
//!
//! # Example
//!
//! ```no_run
//! use matheal::config::PipelineSpec;
//! use matheal::pipeline::run_pipeline;
//!
//! let report = run_pipeline(&PipelineSpec::default())?;
//! println!("{report}");
//! # Ok::<(), matheal::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod export;
pub mod inference;
pub mod nn;
pub mod optim;
pub mod pipeline;
pub mod preprocess;
pub mod quant;
pub mod train;

pub use error::{Error, Result};
