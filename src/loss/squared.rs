use crate::error::{NetworkError, Result};

/// Sum-of-squares loss, `Σ (expected - actual)²`.
pub struct SquaredError;

impl SquaredError {
    /// Elementwise `(expected - actual)²`.
    pub fn loss(expected: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
        check_widths(expected, actual)?;
        Ok(expected.iter().zip(actual)
            .map(|(e, a)| (e - a).powi(2))
            .collect())
    }

    pub fn total(expected: &[f64], actual: &[f64]) -> Result<f64> {
        Ok(Self::loss(expected, actual)?.iter().sum())
    }

    /// ∂Loss/∂actual: `2 * (actual - expected)`.
    pub fn derivative(expected: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
        check_widths(expected, actual)?;
        Ok(expected.iter().zip(actual)
            .map(|(e, a)| 2.0 * (a - e))
            .collect())
    }
}

fn check_widths(expected: &[f64], actual: &[f64]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(NetworkError::OutputWidthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    Ok(())
}
