use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{DetectorError, Result};
use crate::grid::Grid;

/// One `(input, expected output)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

impl TrainingExample {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Self {
        TrainingExample { input, output }
    }

    /// Example whose input is the grid's tile vector and whose label is a
    /// single `0.0` / `1.0`.
    pub fn from_grid(grid: &Grid, is_match: bool) -> Self {
        let label = if is_match { 1.0 } else { 0.0 };
        TrainingExample::new(grid.input_vector(), vec![label])
    }
}

/// An ordered collection of examples that all share one input length.
///
/// Duplicates are allowed; random generation produces plenty of them on
/// small grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExampleSet")]
pub struct TrainingExampleSet {
    input_size: usize,
    examples: Vec<TrainingExample>,
}

#[derive(Deserialize)]
struct RawExampleSet {
    input_size: usize,
    examples: Vec<TrainingExample>,
}

impl TryFrom<RawExampleSet> for TrainingExampleSet {
    type Error = DetectorError;

    fn try_from(raw: RawExampleSet) -> Result<Self> {
        let mut set = TrainingExampleSet::new(raw.input_size);
        for example in raw.examples {
            set.push(example)?;
        }
        Ok(set)
    }
}

impl TrainingExampleSet {
    pub fn new(input_size: usize) -> Self {
        TrainingExampleSet { input_size, examples: Vec::new() }
    }

    /// `count` uniformly random boolean inputs, every one labeled `[0]`.
    ///
    /// Random noise almost never looks like a letter, so this can only stand
    /// in for the negative class. Positives have to be added by hand.
    pub fn generate_negatives<R: Rng + ?Sized>(input_size: usize, count: usize, rng: &mut R) -> Self {
        let examples = (0..count)
            .map(|_| {
                let input = (0..input_size)
                    .map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 })
                    .collect();
                TrainingExample::new(input, vec![0.0])
            })
            .collect();

        TrainingExampleSet { input_size, examples }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrainingExample> {
        self.examples.iter()
    }

    /// Appends one example, rejecting inputs of the wrong length.
    pub fn push(&mut self, example: TrainingExample) -> Result<()> {
        if example.input.len() != self.input_size {
            return Err(DetectorError::dimension(self.input_size, example.input.len()));
        }
        self.examples.push(example);
        Ok(())
    }

    /// Appends a hand-labeled grid.
    pub fn push_grid(&mut self, grid: &Grid, is_match: bool) -> Result<()> {
        self.push(TrainingExample::from_grid(grid, is_match))
    }

    /// Moves every example of `other` onto the end of this set.
    pub fn append(&mut self, other: TrainingExampleSet) -> Result<()> {
        if other.input_size != self.input_size {
            return Err(DetectorError::dimension(self.input_size, other.input_size));
        }
        self.examples.extend(other.examples);
        Ok(())
    }

    /// Number of examples whose first output is at least `0.5`.
    pub fn positive_count(&self) -> usize {
        self.examples
            .iter()
            .filter(|e| e.output.first().is_some_and(|&y| y >= 0.5))
            .count()
    }
}

impl<'a> IntoIterator for &'a TrainingExampleSet {
    type Item = &'a TrainingExample;
    type IntoIter = std::slice::Iter<'a, TrainingExample>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}
