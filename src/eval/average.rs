//! Averaging strategies

/// Averaging strategy for multi-class metrics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Average {
    /// Unweighted mean over classes
    Macro,
    /// Computed from global TP, FP, FN totals
    Micro,
    /// Mean weighted by support (number of true instances per class)
    Weighted,
}
