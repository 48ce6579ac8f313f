pub mod error;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::Activation;
pub use layers::{Layer, DenseLayer, Neuron};
pub use network::{Network, ForwardPass, NetworkSpec, LayerSpec};
pub use loss::SquaredError;
pub use optim::Sgd;
pub use train::{train_network, train_loop, TrainConfig, EpochStats};
