//! Feed-forward network
//!
//! A stack of fully connected layers with explicit forward caching and
//! backpropagation. Weights are stored `[in, out]` so a batch forward pass is
//! `x · W + b`.

mod activation;
mod dense;
mod mlp;

pub use activation::{softmax_rows, Activation};
pub use dense::{Dense, DenseGrads};
pub use mlp::{argmax_rows, ForwardCache, Mlp};
