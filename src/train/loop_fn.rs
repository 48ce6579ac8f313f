use std::time::Instant;

use log::info;
use rand::seq::SliceRandom;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{check_dataset, run_one_epoch};

/// Trains `network` for `config.epochs` epochs of online gradient descent and
/// returns the statistics of every epoch.
///
/// Reported epochs are logged at `info` level: the epoch's total loss, then
/// each sample's loss.
pub fn train_loop(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    check_dataset(train_inputs, train_labels)?;

    let mut order: Vec<usize> = (0..train_inputs.len()).collect();
    let mut rng = rand::thread_rng();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        if config.shuffle {
            order.shuffle(&mut rng);
        }

        let t_start = Instant::now();
        let sample_losses = run_one_epoch(network, train_inputs, train_labels, &order)?;
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            sample_losses,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if config.reports(epoch) {
            info!("epoch {}/{}: total loss {:.6}", epoch, config.epochs, stats.total_loss());
            for (i, loss) in stats.sample_losses.iter().enumerate() {
                info!("  sample {}: loss {:.6}", i, loss);
            }
        }
        history.push(stats);
    }

    Ok(history)
}
