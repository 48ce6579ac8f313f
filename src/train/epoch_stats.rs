use serde::{Serialize, Deserialize};

/// Losses observed during one epoch of `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Total squared error of each sample, in dataset order, measured on the
    /// output of the forward pass that preceded that sample's update.
    pub sample_losses: Vec<f64>,
    /// Wall-clock duration of the epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    pub fn total_loss(&self) -> f64 {
        self.sample_losses.iter().sum()
    }

    pub fn mean_loss(&self) -> f64 {
        if self.sample_losses.is_empty() {
            return 0.0;
        }
        self.total_loss() / self.sample_losses.len() as f64
    }
}
