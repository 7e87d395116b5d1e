use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

/// Half-width of the interval initial weights and biases are drawn from.
pub const INIT_BOUND: f64 = 0.1;

/// A fully connected layer of sigmoid neurons.
///
/// `Layer` keeps no per-call state: `feed` only reads the weights, so a
/// trained layer can be shared with any number of readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// `input_size × size`.
    pub weights: Matrix,
    pub biases: Vec<f64>,
    #[serde(default)]
    pub activator: ActivationFunction,
}

impl Layer {
    /// Fresh layer with weights and biases drawn from `[-INIT_BOUND, INIT_BOUND)`.
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let weights = Matrix::uniform(input_size, size, INIT_BOUND, rng);
        let biases = (0..size)
            .map(|_| rng.gen::<f64>() * 2.0 * INIT_BOUND - INIT_BOUND)
            .collect();

        Layer {
            weights,
            biases,
            activator: ActivationFunction::Sigmoid,
        }
    }

    pub fn size(&self) -> usize {
        self.biases.len()
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// `σ(x·W + b)`. The caller guarantees `input.len() == input_size()`.
    pub fn feed(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.left_mul(input);
        for (zj, bj) in z.iter_mut().zip(&self.biases) {
            *zj = self.activator.function(*zj + bj);
        }
        z
    }

    /// Turns the error signal arriving at this layer's outputs into neuron
    /// deltas: `δ = error ⊙ σ'(a)`.
    pub fn deltas(&self, error: &[f64], outputs: &[f64]) -> Vec<f64> {
        error.iter().zip(outputs)
            .map(|(e, a)| e * self.activator.derivative_from_output(*a))
            .collect()
    }

    /// Error signal for the previous layer's outputs: `W · δ`.
    ///
    /// Must be computed before `apply_deltas` so it uses the weights that
    /// produced the forward pass.
    pub fn backpropagate(&self, deltas: &[f64]) -> Vec<f64> {
        self.weights.right_mul(deltas)
    }

    /// `w_ij += rate · input_i · δ_j`, `b_j += rate · δ_j`.
    pub fn apply_deltas(&mut self, deltas: &[f64], inputs: &[f64], rate: f64) {
        self.weights.add_outer(inputs, deltas, rate);
        for (b, d) in self.biases.iter_mut().zip(deltas) {
            *b += rate * d;
        }
    }

    /// Checks the weight matrix against the bias vector and an expected fan-in.
    pub(crate) fn is_consistent(&self, input_size: usize) -> bool {
        self.weights.is_well_formed()
            && self.weights.rows == input_size
            && self.weights.cols == self.biases.len()
            && self.biases.iter().all(|b| b.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_layer_has_consistent_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(15, 35, &mut rng);
        assert_eq!(layer.size(), 15);
        assert_eq!(layer.input_size(), 35);
        assert!(layer.is_consistent(35));
        assert!(!layer.is_consistent(34));
    }

    #[test]
    fn feed_with_zero_weights_is_sigmoid_of_bias() {
        let layer = Layer {
            weights: Matrix::zeros(3, 2),
            biases: vec![0.0, 2.0],
            activator: ActivationFunction::Sigmoid,
        };
        let out = layer.feed(&[1.0, 1.0, 1.0]);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert!((out[1] - ActivationFunction::Sigmoid.function(2.0)).abs() < 1e-12);
    }

    #[test]
    fn apply_deltas_moves_output_toward_target() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut layer = Layer::new(1, 3, &mut rng);
        let input = [1.0, 0.0, 1.0];

        let before = layer.feed(&input);
        let deltas = layer.deltas(&[1.0 - before[0]], &before);
        layer.apply_deltas(&deltas, &input, 0.5);
        let after = layer.feed(&input);

        assert!(after[0] > before[0]);
    }
}
