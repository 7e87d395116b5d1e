pub struct MseLoss;

impl MseLoss {
    /// Squared error of one example, averaged over its outputs.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let squared: f64 = Self::error(predicted, expected)
            .iter()
            .map(|e| e * e)
            .sum();
        squared / predicted.len() as f64
    }

    /// Per-output error signal: expected - predicted.
    ///
    /// This is the negative gradient of `0.5 · (expected - predicted)²`, so
    /// adding `rate · error · ∂a/∂w` to a weight moves it downhill.
    pub fn error(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| b - a)
            .collect()
    }
}
