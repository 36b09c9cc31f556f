//! Held-out evaluation
//!
//! - `confusion`: `[true][pred]` count matrix
//! - `metrics`: per-class precision, recall, F1 with macro/micro/weighted averages
//! - `report`: labelled classification report

mod average;
mod confusion;
mod metrics;
mod report;

pub use average::Average;
pub use confusion::ConfusionMatrix;
pub use metrics::MultiClassMetrics;
pub use report::{ClassMetrics, ClassificationReport};
