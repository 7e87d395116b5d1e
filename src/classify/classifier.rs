use std::fmt;

use serde::{Serialize, Deserialize};

use crate::classify::verdict::Verdict;
use crate::error::Result;
use crate::grid::Grid;
use crate::network::network::Network;

/// Score and verdict for one grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Raw network output in `[0, 1]`.
    pub score: f64,
    pub verdict: Verdict,
}

impl Classification {
    pub fn from_score(score: f64) -> Self {
        Classification { score, verdict: Verdict::from_score(score) }
    }

    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }
}

impl fmt::Display for Classification {
    /// `"93.21% (match)"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}% ({})", self.percent(), self.verdict)
    }
}

/// Scores `grid` against `network`. Reads both, changes neither.
pub fn classify(grid: &Grid, network: &Network) -> Result<Classification> {
    classify_input(&grid.input_vector(), network)
}

/// Same as [`classify`] for an already flattened `0.0`/`1.0` vector.
pub fn classify_input(input: &[f64], network: &Network) -> Result<Classification> {
    let score = network.activate(input)?;
    Ok(Classification::from_score(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::error::DetectorError;

    #[test]
    fn classification_matches_activation() {
        let mut rng = StdRng::seed_from_u64(41);
        let net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
        let grid = Grid::from_pattern(&["#.", "##"]).unwrap();

        let c = classify(&grid, &net).unwrap();
        assert_eq!(c.score, net.activate(&[1.0, 0.0, 1.0, 1.0]).unwrap());
        assert_eq!(c.verdict, Verdict::from_score(c.score));
    }

    #[test]
    fn grid_of_wrong_size_is_a_dimension_error() {
        let mut rng = StdRng::seed_from_u64(42);
        let net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
        let grid = Grid::blank(3, 3).unwrap();
        assert!(matches!(
            classify(&grid, &net),
            Err(DetectorError::Dimension { expected: 4, got: 9 })
        ));
    }

    #[test]
    fn display_shows_percentage_and_label() {
        assert_eq!(Classification::from_score(0.93214).to_string(), "93.21% (match)");
        assert_eq!(Classification::from_score(0.5).to_string(), "50.00% (partial match)");
        assert_eq!(Classification::from_score(0.0123).to_string(), "1.23% (no match)");
    }
}
