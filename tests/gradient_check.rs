// Finite-difference checks of the hand-derived backward pass.

use approx::assert_relative_eq;
use backprop_nn::{Activation, DenseLayer, Layer, Network, Neuron};

type NeuronParams = (Vec<f64>, f64);

const INPUT: [f64; 2] = [0.7, -1.2];
const EXPECTED: [f64; 2] = [0.3, -0.5];

// 2 -> 3 (relu) -> 2 (linear). Every hidden pre-activation sits well away
// from the ReLU kink so the numerical derivative is well defined.
fn reference_params() -> Vec<(Vec<NeuronParams>, Activation)> {
    vec![
        (
            vec![
                (vec![0.5, -0.4], 0.1),
                (vec![-0.6, 0.2], 0.05),
                (vec![0.3, 0.9], 1.2),
            ],
            Activation::ReLU,
        ),
        (
            vec![
                (vec![0.7, -0.3, 0.5], 0.0),
                (vec![-0.2, 0.4, 0.6], 0.1),
            ],
            Activation::Linear,
        ),
    ]
}

fn build(params: &[(Vec<NeuronParams>, Activation)], learning_rate: f64) -> Network {
    let layers = params.iter()
        .map(|(neurons, activation)| {
            let neurons = neurons.iter()
                .map(|(w, b)| {
                    Neuron::from_parameters(w.clone(), *b, *activation)
                        .and_then(|n| n.with_learning_rate(learning_rate))
                        .unwrap()
                })
                .collect();
            Box::new(DenseLayer::from_neurons(neurons).unwrap()) as Box<dyn Layer>
        })
        .collect();
    Network::new(layers).unwrap()
}

fn flatten(network: &Network) -> Vec<f64> {
    network.layers().iter().flat_map(|l| l.parameters()).collect()
}

// Writes flat parameter `k` (layer order, then neuron order, weights then bias).
fn perturbed(k: usize, delta: f64) -> Vec<(Vec<NeuronParams>, Activation)> {
    let mut params = reference_params();
    let mut idx = 0;
    for (neurons, _) in params.iter_mut() {
        for (weights, bias) in neurons.iter_mut() {
            for w in weights.iter_mut() {
                if idx == k {
                    *w += delta;
                }
                idx += 1;
            }
            if idx == k {
                *bias += delta;
            }
            idx += 1;
        }
    }
    params
}

fn loss_at(params: &[(Vec<NeuronParams>, Activation)]) -> f64 {
    let net = build(params, 1.0);
    let out = net.predict(&INPUT).unwrap();
    net.total_loss(&EXPECTED, &out).unwrap()
}

#[test]
fn analytic_gradient_matches_finite_difference() {
    // With a unit learning rate one step subtracts exactly the gradient.
    let mut net = build(&reference_params(), 1.0);
    let before = flatten(&net);
    let pass = net.forward(&INPUT).unwrap();
    net.backward(&EXPECTED, pass).unwrap();
    let after = flatten(&net);

    let eps = 1e-6;
    for k in 0..before.len() {
        let analytic = before[k] - after[k];
        let numeric = (loss_at(&perturbed(k, eps)) - loss_at(&perturbed(k, -eps))) / (2.0 * eps);
        assert!(
            (analytic - numeric).abs() < 1e-4,
            "parameter {}: analytic {} vs numeric {}", k, analytic, numeric
        );
    }
}

#[test]
fn inactive_relu_neuron_gets_no_update() {
    let mut net = build(&reference_params(), 0.001);
    let before = flatten(&net);
    let pass = net.forward(&INPUT).unwrap();
    net.backward(&EXPECTED, pass).unwrap();
    let after = flatten(&net);
    // hidden neuron 1 occupies flat indices 3..6
    assert_eq!(&before[3..6], &after[3..6]);
}

#[test]
fn step_lowers_an_overshooting_output() {
    let params = vec![
        (vec![(vec![1.0], 0.5), (vec![2.0], 0.0), (vec![0.5], 1.0)], Activation::ReLU),
        (vec![(vec![1.0, 1.0, 1.0], 0.0)], Activation::Linear),
    ];
    let mut net = build(&params, 0.001);
    let pass = net.forward(&[1.0]).unwrap();
    let before = pass.output()[0];
    let expected = [before - 2.0];
    let loss_before = net.total_loss(&expected, pass.output()).unwrap();
    net.backward(&expected, pass).unwrap();

    let after = net.predict(&[1.0]).unwrap();
    assert!(after[0] < before);
    assert!(net.total_loss(&expected, &after).unwrap() < loss_before);
}

#[test]
fn layer_upstream_gradient_sums_over_neurons() {
    let mut layer = DenseLayer::from_neurons(vec![
        Neuron::from_parameters(vec![0.5, 0.25], 0.0, Activation::ReLU).unwrap(),
        Neuron::from_parameters(vec![-1.0, 0.75], 0.5, Activation::ReLU).unwrap(),
    ]).unwrap();
    let (out, cache) = layer.forward(&[1.0, 2.0]).unwrap();
    assert_eq!(out, vec![1.0, 1.0]);

    let d_inputs = layer.backward(&[2.0, -3.0], cache).unwrap();
    // j = 0: 2 * 0.5 + (-3) * (-1.0); j = 1: 2 * 0.25 + (-3) * 0.75
    assert_relative_eq!(d_inputs[0], 4.0, epsilon = 1e-12);
    assert_relative_eq!(d_inputs[1], -1.75, epsilon = 1e-12);
}
