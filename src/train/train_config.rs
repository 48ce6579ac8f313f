use serde::{Serialize, Deserialize};

/// Settings for a `train_loop` run.
///
/// - `epochs`       — full passes over the training data
/// - `report_every` — log the losses every this many epochs (0 disables)
/// - `shuffle`      — visit samples in a fresh random order each epoch instead
///                    of dataset order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub report_every: usize,
    pub shuffle: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig { epochs: 500, report_every: 100, shuffle: false }
    }
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs, ..TrainConfig::default() }
    }

    /// Whether `epoch` (0-based) is one that gets reported.
    pub fn reports(&self, epoch: usize) -> bool {
        self.report_every != 0 && epoch % self.report_every == 0
    }
}
