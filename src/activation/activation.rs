use serde::{Serialize, Deserialize};

/// Scalar activation applied to a neuron's weighted sum.
///
/// The set is closed: every neuron of a network uses one of these two
/// variants, and `derivative` is the exact derivative of `function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    #[serde(rename = "relu")]
    ReLU,
}

impl Activation {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::ReLU => x.max(0.0),
        }
    }

    /// Derivative evaluated at the pre-activation value `x`.
    /// ReLU's derivative at exactly zero is 0.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Linear => 1.0,
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
        }
    }
}
