use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Squashing function applied by every neuron of the perceptron.
///
/// Only the logistic sigmoid is offered: it is what keeps a detector's score
/// inside `[0, 1]`. The variant is still recorded in snapshots so the file
/// says how its weights are meant to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
        }
    }

    /// Derivative expressed in terms of the neuron's *output* `fx = function(x)`.
    ///
    /// Backprop already holds every activation from the forward pass, so there
    /// is no need to keep the pre-activation sums around.
    pub fn derivative_from_output(&self, fx: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => fx * (1.0 - fx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        let s = ActivationFunction::Sigmoid;
        assert!((s.function(0.0) - 0.5).abs() < 1e-12);
        assert!(s.function(50.0) <= 1.0);
        assert!(s.function(-50.0) >= 0.0);
        assert!((s.derivative_from_output(0.5) - 0.25).abs() < 1e-12);
    }
}
