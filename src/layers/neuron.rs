use rand::Rng;

use crate::activation::Activation;
use crate::error::{NetworkError, Result};
use crate::optim::sgd::Sgd;

/// Upper bound (exclusive) of the uniform range used for fresh weights and bias.
pub const INIT_RANGE: f64 = 0.01;

/// What `forward` saw, needed by the matching `backward`.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronCache {
    pub input: Vec<f64>,
    /// Pre-activation value `bias + Σ input[i] * weight[i]`.
    pub weighted_sum: f64,
}

/// Partial derivatives of the loss for one neuron, all taken at the
/// parameters in effect during the forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronGradients {
    pub d_weights: Vec<f64>,
    pub d_bias: f64,
    /// ∂Loss/∂input, handed to the previous layer.
    pub d_input: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
    activation: Activation,
    optimizer: Sgd,
}

impl Neuron {
    /// Random weights and bias drawn uniformly from `[0, 0.01)`.
    pub fn new(n_inputs: usize, activation: Activation) -> Result<Neuron> {
        Neuron::with_rng(n_inputs, activation, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(
        n_inputs: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Neuron> {
        if n_inputs == 0 {
            return Err(NetworkError::ZeroWidth);
        }
        let weights = (0..n_inputs).map(|_| rng.gen_range(0.0..INIT_RANGE)).collect();
        let bias = rng.gen_range(0.0..INIT_RANGE);
        Ok(Neuron { weights, bias, activation, optimizer: Sgd::default() })
    }

    /// Builds a neuron with known parameters.
    pub fn from_parameters(weights: Vec<f64>, bias: f64, activation: Activation) -> Result<Neuron> {
        if weights.is_empty() {
            return Err(NetworkError::ZeroWidth);
        }
        Ok(Neuron { weights, bias, activation, optimizer: Sgd::default() })
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Result<Neuron> {
        self.optimizer = Sgd::new(learning_rate)?;
        Ok(self)
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn weighted_sum(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.weights.len() {
            return Err(NetworkError::InputWidthMismatch {
                expected: self.weights.len(),
                actual: input.len(),
            });
        }
        Ok(input.iter().zip(&self.weights).fold(self.bias, |sum, (x, w)| sum + x * w))
    }

    /// Returns the activated output together with the cache `backward` needs.
    pub fn forward(&self, input: &[f64]) -> Result<(f64, NeuronCache)> {
        let weighted_sum = self.weighted_sum(input)?;
        let output = self.activation.function(weighted_sum);
        Ok((output, NeuronCache { input: input.to_vec(), weighted_sum }))
    }

    /// Chain rule through the activation, the weighted sum and the inputs.
    /// `gradient` is ∂Loss/∂output. Does not modify the neuron.
    pub fn gradients(&self, gradient: f64, cache: &NeuronCache) -> NeuronGradients {
        let d = gradient * self.activation.derivative(cache.weighted_sum);
        NeuronGradients {
            d_weights: cache.input.iter().map(|x| d * x).collect(),
            d_bias: d,
            d_input: self.weights.iter().map(|w| d * w).collect(),
        }
    }

    /// Computes the gradients, applies one descent step, and returns
    /// ∂Loss/∂input computed from the weights as they were before the step.
    pub fn backward(&mut self, gradient: f64, cache: &NeuronCache) -> Result<Vec<f64>> {
        if cache.input.len() != self.weights.len() {
            return Err(NetworkError::CacheWidthMismatch {
                expected: self.weights.len(),
                actual: cache.input.len(),
            });
        }
        let grads = self.gradients(gradient, cache);
        self.optimizer.step(&mut self.weights, &grads.d_weights);
        self.optimizer.step_scalar(&mut self.bias, grads.d_bias);
        Ok(grads.d_input)
    }
}
