//! Property-based convergence tests for optimizers
//!
//! - Quadratic convergence (convex, optimum at the origin)
//! - Ill-conditioned problems
//! - Numerical edge cases (very small/large gradients)

mod helpers;
