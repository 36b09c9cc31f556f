//! Tabular data ingestion
//!
//! Reads the vital-signs CSV into a dense feature matrix plus the raw risk
//! label of every row.

mod dataset;
mod loader;

pub use dataset::Dataset;
pub use loader::{load_csv, parse_csv};
