use std::process::ExitCode;

use log::{error, info};

use backprop_nn::{train_loop, NetworkSpec, Result};

/// Runs the plus-two regression: learn `y = x + 2` on `x = 0..9`, then try
/// inputs outside the training range. `123` is far enough out that a small
/// ReLU network is not expected to extrapolate to it.
fn run(spec: &NetworkSpec) -> Result<()> {
    let mut network = spec.build()?;

    let inputs: Vec<Vec<f64>> = (0..10).map(|x| vec![x as f64]).collect();
    let labels: Vec<Vec<f64>> = inputs.iter().map(|x| vec![x[0] + 2.0]).collect();

    let history = train_loop(&mut network, &inputs, &labels, &spec.training)?;
    if let Some(last) = history.last() {
        info!("finished {} epochs, final total loss {:.6}", history.len(), last.total_loss());
    }

    for x in [-19.0, 12.0, 13.0, 14.0, 15.0, 123.0] {
        let actual = network.predict(&[x])?;
        println!("input {:>6}: expected {:>6}, actual {:.4?}", x, x + 2.0, actual);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let spec = match std::env::args().nth(1) {
        Some(path) => match NetworkSpec::load_json(&path) {
            Ok(spec) => spec,
            Err(e) => {
                error!("failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => NetworkSpec::plus_two(),
    };

    match run(&spec) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
