//! Lite runtime
//!
//! Loads an exported artifact, validates it, and classifies samples with
//! the embedded scaler and label names. This is the same path a consumer of
//! the artifact takes, and the one used for post-export parity checks.

mod inspect;
mod model;
mod prediction;

pub use inspect::{ArtifactSummary, TensorInfo};
pub use model::LiteModel;
pub use prediction::Prediction;
