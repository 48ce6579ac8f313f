pub mod dense;
pub mod neuron;

use std::any::Any;
use std::fmt::{self, Debug};

use crate::error::Result;

pub use dense::{DenseCache, DenseLayer};
pub use neuron::{Neuron, NeuronCache, NeuronGradients};

/// Whatever a layer recorded during `forward`. Only the layer that produced
/// it knows the concrete type inside.
pub struct LayerCache {
    inner: Box<dyn Any>,
}

impl LayerCache {
    pub fn new<T: Any>(value: T) -> LayerCache {
        LayerCache { inner: Box::new(value) }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    pub fn downcast<T: Any>(self) -> Option<T> {
        self.inner.downcast().ok().map(|b| *b)
    }
}

impl Debug for LayerCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerCache").finish_non_exhaustive()
    }
}

/// Uniform contract every layer of a `Network` satisfies.
///
/// `forward` is side-effect free and returns a cache; `backward` consumes that
/// cache, applies one gradient-descent step to the layer's parameters and
/// returns ∂Loss/∂input for the previous layer.
pub trait Layer: Debug {
    fn input_size(&self) -> usize;

    fn output_size(&self) -> usize;

    fn parameter_count(&self) -> usize;

    /// Flat copy of every trainable parameter, in a layer-defined order.
    fn parameters(&self) -> Vec<f64>;

    fn forward(&self, input: &[f64]) -> Result<(Vec<f64>, LayerCache)>;

    /// Fails if `cache` could not have come from this layer's `forward`.
    /// Never mutates, so callers can validate a whole pass before any step.
    fn check_cache(&self, cache: &LayerCache) -> Result<()>;

    /// Leaves the parameters untouched when it returns an error.
    fn backward(&mut self, gradient: &[f64], cache: LayerCache) -> Result<Vec<f64>>;
}
