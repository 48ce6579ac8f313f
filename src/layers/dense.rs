use log::trace;
use rand::Rng;

use crate::activation::Activation;
use crate::error::{NetworkError, Result};
use crate::layers::{Layer, LayerCache};
use crate::layers::neuron::{Neuron, NeuronCache};

/// Per-neuron caches of one `DenseLayer::forward` call, in neuron order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseCache {
    pub neurons: Vec<NeuronCache>,
}

/// Fully connected layer: every neuron sees the whole input vector.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    input_size: usize,
    activation: Activation,
    neurons: Vec<Neuron>,
}

impl DenseLayer {
    pub fn new(input_size: usize, size: usize, activation: Activation) -> Result<DenseLayer> {
        DenseLayer::with_rng(input_size, size, activation, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(
        input_size: usize,
        size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Result<DenseLayer> {
        let neurons = (0..size)
            .map(|_| Neuron::with_rng(input_size, activation, rng))
            .collect::<Result<Vec<_>>>()?;
        DenseLayer::from_neurons(neurons)
    }

    /// Groups pre-built neurons into a layer. They must agree on input width
    /// and activation.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Result<DenseLayer> {
        let first = neurons.first().ok_or(NetworkError::EmptyLayer)?;
        let input_size = first.input_size();
        let activation = first.activation();
        if neurons.iter().any(|n| n.input_size() != input_size || n.activation() != activation) {
            return Err(NetworkError::MixedLayer);
        }
        Ok(DenseLayer { input_size, activation, neurons })
    }

    /// Sets the same learning rate on every neuron.
    pub fn with_learning_rate(self, learning_rate: f64) -> Result<DenseLayer> {
        let neurons = self.neurons.into_iter()
            .map(|n| n.with_learning_rate(learning_rate))
            .collect::<Result<Vec<_>>>()?;
        Ok(DenseLayer { input_size: self.input_size, activation: self.activation, neurons })
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }
}

impl Layer for DenseLayer {
    fn input_size(&self) -> usize {
        self.input_size
    }

    fn output_size(&self) -> usize {
        self.neurons.len()
    }

    fn parameter_count(&self) -> usize {
        self.neurons.len() * (self.input_size + 1)
    }

    /// Each neuron's weights followed by its bias.
    fn parameters(&self) -> Vec<f64> {
        let mut params = Vec::with_capacity(self.parameter_count());
        for n in &self.neurons {
            params.extend_from_slice(n.weights());
            params.push(n.bias());
        }
        params
    }

    fn forward(&self, input: &[f64]) -> Result<(Vec<f64>, LayerCache)> {
        let mut outputs = Vec::with_capacity(self.neurons.len());
        let mut caches = Vec::with_capacity(self.neurons.len());
        for neuron in &self.neurons {
            let (out, cache) = neuron.forward(input)?;
            outputs.push(out);
            caches.push(cache);
        }
        Ok((outputs, LayerCache::new(DenseCache { neurons: caches })))
    }

    fn check_cache(&self, cache: &LayerCache) -> Result<()> {
        let cache = cache.downcast_ref::<DenseCache>().ok_or(NetworkError::ForeignCache)?;
        if cache.neurons.len() != self.neurons.len() {
            return Err(NetworkError::CacheWidthMismatch {
                expected: self.neurons.len(),
                actual: cache.neurons.len(),
            });
        }
        if let Some(bad) = cache.neurons.iter().find(|c| c.input.len() != self.input_size) {
            return Err(NetworkError::CacheWidthMismatch {
                expected: self.input_size,
                actual: bad.input.len(),
            });
        }
        Ok(())
    }

    /// Runs every neuron's backward in order and sums their input gradients:
    /// each input feeds every neuron, so its total derivative is the sum over
    /// all of them.
    fn backward(&mut self, gradient: &[f64], cache: LayerCache) -> Result<Vec<f64>> {
        if gradient.len() != self.neurons.len() {
            return Err(NetworkError::GradientWidthMismatch {
                expected: self.neurons.len(),
                actual: gradient.len(),
            });
        }
        self.check_cache(&cache)?;
        let cache = cache.downcast::<DenseCache>().ok_or(NetworkError::ForeignCache)?;

        let mut d_inputs = vec![0.0; self.input_size];
        for ((neuron, grad), neuron_cache) in self.neurons.iter_mut().zip(gradient).zip(&cache.neurons) {
            let d_input = neuron.backward(*grad, neuron_cache)?;
            for (acc, d) in d_inputs.iter_mut().zip(&d_input) {
                *acc += d;
            }
        }
        trace!("dense layer backward: {} neurons, d_inputs = {:?}", self.neurons.len(), d_inputs);
        Ok(d_inputs)
    }
}
