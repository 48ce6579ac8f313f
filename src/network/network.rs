use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};
use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::layers::{DenseLayer, Layer, LayerCache};
use crate::loss::SquaredError;
use crate::network::spec::LayerSpec;
use crate::optim::sgd::DEFAULT_LEARNING_RATE;

static NEXT_NETWORK_ID: AtomicU64 = AtomicU64::new(0);

/// Output of one `Network::forward` call together with the caches that
/// `Network::backward` consumes.
///
/// A pass is tied to the network that produced it and to the parameters in
/// effect at that time: once any backward step has run, older passes are
/// rejected.
#[derive(Debug)]
pub struct ForwardPass {
    output: Vec<f64>,
    caches: Vec<LayerCache>,
    network_id: u64,
    generation: u64,
}

impl ForwardPass {
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn into_output(self) -> Vec<f64> {
        self.output
    }
}

#[derive(Debug)]
pub struct Network {
    layers: Vec<Box<dyn Layer>>,
    id: u64,
    /// Number of backward steps applied so far.
    generation: u64,
}

impl Network {
    /// Chains `layers` input to output. Consecutive widths must agree.
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Result<Network> {
        if layers.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_size() != pair[1].input_size() {
                return Err(NetworkError::LayerWidthMismatch {
                    layer: i + 1,
                    expected: pair[1].input_size(),
                    actual: pair[0].output_size(),
                });
            }
        }
        debug!(
            "built network: {} layers, {} parameters",
            layers.len(),
            layers.iter().map(|l| l.parameter_count()).sum::<usize>()
        );
        Ok(Network {
            layers,
            id: NEXT_NETWORK_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
        })
    }

    /// Builds dense layers from their descriptions with the default learning rate.
    pub fn from_specs(specs: &[LayerSpec]) -> Result<Network> {
        Network::from_specs_with_rng(specs, DEFAULT_LEARNING_RATE, &mut rand::thread_rng())
    }

    pub fn from_specs_with_rng<R: Rng>(
        specs: &[LayerSpec],
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Network> {
        let layers = specs.iter()
            .map(|s| -> Result<Box<dyn Layer>> {
                let layer = DenseLayer::with_rng(s.input_size, s.size, s.activation, rng)?
                    .with_learning_rate(learning_rate)?;
                Ok(Box::new(layer) as Box<dyn Layer>)
            })
            .collect::<Result<Vec<_>>>()?;
        Network::new(layers)
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }

    /// Threads `input` through every layer in order.
    pub fn forward(&self, input: &[f64]) -> Result<ForwardPass> {
        let mut caches = Vec::with_capacity(self.layers.len());
        let mut current = input.to_vec();
        for layer in &self.layers {
            let (output, cache) = layer.forward(&current)?;
            caches.push(cache);
            current = output;
        }
        Ok(ForwardPass {
            output: current,
            caches,
            network_id: self.id,
            generation: self.generation,
        })
    }

    /// Inference only; the caches are dropped.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(input)?.into_output())
    }

    /// One gradient-descent step on every neuron, driven by the squared error
    /// between `expected` and the output recorded in `pass`.
    ///
    /// Every check runs before the first parameter changes, so an error
    /// leaves the network exactly as it was.
    pub fn backward(&mut self, expected: &[f64], pass: ForwardPass) -> Result<()> {
        self.check_pass(&pass)?;
        let mut gradient = SquaredError::derivative(expected, &pass.output)?;
        trace!("output gradient: {:?}", gradient);

        for (layer, cache) in self.layers.iter_mut().zip(pass.caches).rev() {
            gradient = layer.backward(&gradient, cache)?;
        }
        self.generation += 1;
        Ok(())
    }

    fn check_pass(&self, pass: &ForwardPass) -> Result<()> {
        if pass.network_id != self.id {
            return Err(NetworkError::ForeignPass);
        }
        if pass.generation != self.generation {
            return Err(NetworkError::StalePass { pass: pass.generation, network: self.generation });
        }
        if pass.caches.len() != self.layers.len() {
            return Err(NetworkError::CacheWidthMismatch {
                expected: self.layers.len(),
                actual: pass.caches.len(),
            });
        }
        if pass.output.len() != self.output_size() {
            return Err(NetworkError::OutputWidthMismatch {
                expected: self.output_size(),
                actual: pass.output.len(),
            });
        }
        for (layer, cache) in self.layers.iter().zip(&pass.caches) {
            layer.check_cache(cache)?;
        }
        Ok(())
    }

    /// Elementwise squared error.
    pub fn loss(&self, expected: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
        SquaredError::loss(expected, actual)
    }

    /// Sum of squared errors.
    pub fn total_loss(&self, expected: &[f64], actual: &[f64]) -> Result<f64> {
        SquaredError::total(expected, actual)
    }
}
