//! Lite conversion and export
//!
//! The trained network is frozen into a [`LiteGraph`] (fully-connected ops,
//! weights `[out, in]`, optionally quantized), serialized into a safetensors
//! container whose header carries the [`ArtifactMetadata`], verified against
//! the float model, and only then written atomically to disk.

mod graph;
mod metadata;
mod parity;
mod writer;

pub use graph::{LiteGraph, LiteLayer, LiteWeights};
pub use metadata::{ArtifactMetadata, LayerInfo, Sidecar, TrainingSummary, FORMAT_TAG, FORMAT_VERSION};
pub use parity::{verify_parity, ParityReport};
pub use writer::{serialize_artifact, sha256_hex, write_atomic, ExportReport};
