use crate::error::{NetworkError, Result};

/// Step size every neuron uses unless configured otherwise.
pub const DEFAULT_LEARNING_RATE: f64 = 0.001;

/// Plain gradient descent: `param -= learning_rate * grad`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd { learning_rate: DEFAULT_LEARNING_RATE }
    }
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(NetworkError::InvalidLearningRate(learning_rate));
        }
        Ok(Sgd { learning_rate })
    }

    /// Applies one update in place. `params` and `grads` must have equal length.
    pub fn step(&self, params: &mut [f64], grads: &[f64]) {
        debug_assert_eq!(params.len(), grads.len());
        let updated = sgd_update(params, grads, self.learning_rate);
        params.copy_from_slice(&updated);
    }

    pub fn step_scalar(&self, param: &mut f64, grad: f64) {
        *param = sgd_scalar(*param, grad, self.learning_rate);
    }
}

/// Pure form of the update: returns the new parameters without touching the old.
pub fn sgd_update(params: &[f64], grads: &[f64], learning_rate: f64) -> Vec<f64> {
    params.iter().zip(grads)
        .map(|(p, g)| sgd_scalar(*p, *g, learning_rate))
        .collect()
}

#[inline]
fn sgd_scalar(param: f64, grad: f64, learning_rate: f64) -> f64 {
    param - learning_rate * grad
}
