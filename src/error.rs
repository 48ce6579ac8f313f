use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Contract violations raised by the engine, plus the I/O failures of the
/// configuration layer.
///
/// None of the width errors are meant to be retried: they signal a caller bug
/// and are reported instead of silently truncating or padding vectors.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("input width mismatch: expected {expected}, got {actual}")]
    InputWidthMismatch { expected: usize, actual: usize },

    #[error("forward cache width mismatch: expected {expected}, got {actual}")]
    CacheWidthMismatch { expected: usize, actual: usize },

    #[error("forward cache was not produced by this kind of layer")]
    ForeignCache,

    #[error("forward pass belongs to a different network")]
    ForeignPass,

    #[error("forward pass is stale: taken at step {pass}, network is at step {network}")]
    StalePass { pass: u64, network: u64 },

    #[error("gradient width mismatch: expected {expected}, got {actual}")]
    GradientWidthMismatch { expected: usize, actual: usize },

    #[error("output width mismatch: expected {expected}, got {actual}")]
    OutputWidthMismatch { expected: usize, actual: usize },

    #[error("layer {layer} expects {expected} inputs but the previous layer produces {actual}")]
    LayerWidthMismatch { layer: usize, expected: usize, actual: usize },

    #[error("a network needs at least one layer")]
    EmptyNetwork,

    #[error("a layer needs at least one neuron")]
    EmptyLayer,

    #[error("a neuron needs at least one input")]
    ZeroWidth,

    #[error("neurons of one layer must share input width and activation")]
    MixedLayer,

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("dataset has {inputs} inputs but {labels} labels")]
    DatasetMismatch { inputs: usize, labels: usize },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
