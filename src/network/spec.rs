use log::info;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sgd::DEFAULT_LEARNING_RATE;
use crate::train::train_config::TrainConfig;

/// Describes one dense layer.
///
/// - `size`       — number of neurons in this layer
/// - `input_size` — width of the vector feeding this layer (the previous
///                  layer's `size`, or the raw input width for the first layer)
/// - `activation` — applied to every neuron's weighted sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: Activation,
}

/// Architecture and training settings, loadable from JSON.
///
/// Only the shape of the network is described here; trained weights are never
/// written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    /// Ordered input → output.
    pub layers: Vec<LayerSpec>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Seed for weight initialization; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub training: TrainConfig,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

impl NetworkSpec {
    /// One input, three ReLU neurons, one linear output.
    pub fn plus_two() -> NetworkSpec {
        NetworkSpec {
            name: "plus-two".to_string(),
            layers: vec![
                LayerSpec { size: 3, input_size: 1, activation: Activation::ReLU },
                LayerSpec { size: 1, input_size: 3, activation: Activation::Linear },
            ],
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: None,
            training: TrainConfig::default(),
        }
    }

    pub fn build(&self) -> Result<Network> {
        info!("building network '{}' ({} layers)", self.name, self.layers.len());
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Network::from_specs_with_rng(&self.layers, self.learning_rate, &mut rng)
            }
            None => Network::from_specs_with_rng(&self.layers, self.learning_rate, &mut rand::thread_rng()),
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::layers::Layer;

    #[test]
    fn parses_minimal_json_with_defaults() {
        let json = r#"{
            "name": "tiny",
            "layers": [
                { "size": 2, "input_size": 1, "activation": "relu" },
                { "size": 1, "input_size": 2, "activation": "linear" }
            ]
        }"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.learning_rate, 0.001);
        assert_eq!(spec.seed, None);
        assert_eq!(spec.training, TrainConfig::default());
        assert_eq!(spec.layers[0].activation, Activation::ReLU);
    }

    #[test]
    fn seeded_specs_build_identical_networks() {
        let spec = NetworkSpec { seed: Some(42), ..NetworkSpec::plus_two() };
        let a = spec.build().unwrap();
        let b = spec.build().unwrap();
        for (la, lb) in a.layers().iter().zip(b.layers()) {
            assert_eq!(la.parameters(), lb.parameters());
        }
    }

    #[test]
    fn build_reports_inconsistent_layers() {
        let mut spec = NetworkSpec::plus_two();
        spec.layers[1].input_size = 4;
        assert!(matches!(spec.build(), Err(NetworkError::LayerWidthMismatch { .. })));
    }

    #[test]
    fn save_then_load_json() {
        let path = std::env::temp_dir().join("backprop_nn_spec_roundtrip.json");
        let path = path.to_str().unwrap();
        let spec = NetworkSpec { seed: Some(7), ..NetworkSpec::plus_two() };
        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(loaded, spec);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = NetworkSpec::load_json("/nonexistent/backprop_nn/spec.json").unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
