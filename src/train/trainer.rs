use crate::error::{NetworkError, Result};
use crate::network::network::Network;

/// One pass of online gradient descent over the samples, in the given
/// `order`. Returns each sample's total loss indexed by sample, taken from
/// the output that drove its update.
pub(crate) fn run_one_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    order: &[usize],
) -> Result<Vec<f64>> {
    let mut losses = vec![0.0; inputs.len()];
    for &idx in order {
        let pass = network.forward(&inputs[idx])?;
        losses[idx] = network.total_loss(&labels[idx], pass.output())?;
        network.backward(&labels[idx], pass)?;
    }
    Ok(losses)
}

pub(crate) fn check_dataset(inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<()> {
    if inputs.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }
    if inputs.len() != labels.len() {
        return Err(NetworkError::DatasetMismatch { inputs: inputs.len(), labels: labels.len() });
    }
    Ok(())
}

/// Trains on every sample once, in dataset order, and returns the per-sample
/// losses.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<Vec<f64>> {
    check_dataset(inputs, expected_outputs)?;
    let order: Vec<usize> = (0..inputs.len()).collect();
    run_one_epoch(network, inputs, expected_outputs, &order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkSpec;

    #[test]
    fn rejects_bad_datasets() {
        let mut net = NetworkSpec::plus_two().build().unwrap();
        assert!(matches!(train_network(&mut net, &[], &[]), Err(NetworkError::EmptyDataset)));
        assert!(matches!(
            train_network(&mut net, &[vec![1.0]], &[]),
            Err(NetworkError::DatasetMismatch { inputs: 1, labels: 0 })
        ));
    }

    #[test]
    fn returns_one_loss_per_sample() {
        let mut net = NetworkSpec::plus_two().build().unwrap();
        let inputs = vec![vec![0.0], vec![1.0], vec![2.0]];
        let labels = vec![vec![2.0], vec![3.0], vec![4.0]];
        let losses = train_network(&mut net, &inputs, &labels).unwrap();
        assert_eq!(losses.len(), 3);
        assert!(losses.iter().all(|l| *l > 0.0));
    }
}
