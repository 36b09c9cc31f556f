//! Shared test helpers for optimizer convergence tests

#[cfg(test)]
use crate::optim::{Optimizer, Param};
#[cfg(test)]
use ndarray::ArrayD;

/// Run `iterations` steps from `init` with gradients from `grad_fn`
#[cfg(test)]
pub fn minimize<O, F>(optimizer: &mut O, init: &[f32], iterations: usize, grad_fn: F) -> ArrayD<f32>
where
    O: Optimizer,
    F: Fn(&ArrayD<f32>) -> ArrayD<f32>,
{
    let mut value = ndarray::Array1::from(init.to_vec()).into_dyn();
    for _ in 0..iterations {
        let grad = grad_fn(&value);
        optimizer.step(&mut [Param::new(value.view_mut(), grad.view())]);
    }
    value
}

/// Test that optimizer converges on f(x) = x^2
#[cfg(test)]
pub fn test_quadratic_convergence<O: Optimizer>(mut optimizer: O, iterations: usize, threshold: f32) -> bool {
    let result = minimize(&mut optimizer, &[3.0, -2.0, 1.5, -2.5], iterations, |x| x.mapv(|v| 2.0 * v));
    result.iter().all(|&val| val.abs() < threshold)
}

/// Test that optimizer decreases loss monotonically from far away
#[cfg(test)]
pub fn test_loss_decreases<O: Optimizer>(mut optimizer: O, iterations: usize) -> bool {
    let mut value = ndarray::arr1(&[10.0f32]).into_dyn();
    let mut prev_loss = f32::INFINITY;

    for _ in 0..iterations {
        let loss = value[0] * value[0];
        if loss > prev_loss + 1e-3 {
            return false;
        }
        prev_loss = loss;
        let grad = value.mapv(|v| 2.0 * v);
        optimizer.step(&mut [Param::new(value.view_mut(), grad.view())]);
    }
    true
}

/// f(x,y) = 0.5*(x^2 + 100*y^2)
#[cfg(test)]
pub fn test_ill_conditioned_convergence<O: Optimizer>(
    mut optimizer: O,
    iterations: usize,
    threshold: f32,
) -> bool {
    let result = minimize(&mut optimizer, &[10.0, 10.0], iterations, |x| {
        ndarray::arr1(&[x[0], 100.0 * x[1]]).into_dyn()
    });
    result.iter().all(|&val| val.abs() < threshold)
}

/// Gradients at both ends of the f32 range must not produce NaN or Inf
#[cfg(test)]
pub fn test_extreme_gradient_stability<O: Optimizer>(mut optimizer: O, start: f32) -> bool {
    let result = minimize(&mut optimizer, &[start, -start], 100, |x| x.mapv(|v| 2.0 * v));
    result.iter().all(|val| val.is_finite())
}
