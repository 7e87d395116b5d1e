use std::fmt;

use rand::Rng;

use crate::error::Result;
use crate::grid::Grid;
use crate::data::example_set::TrainingExampleSet;

/// Width of the built-in exemplar grids.
pub const LETTER_WIDTH: usize = 5;
/// Height of the built-in exemplar grids.
pub const LETTER_HEIGHT: usize = 7;

const A1: [&str; LETTER_HEIGHT] = [
    ".###.",
    "#...#",
    "#...#",
    "#####",
    "#...#",
    "#...#",
    "#...#",
];

const A2: [&str; LETTER_HEIGHT] = [
    "..#..",
    ".#.#.",
    "#...#",
    "#...#",
    "#####",
    "#...#",
    "#...#",
];

const B1: [&str; LETTER_HEIGHT] = [
    "####.",
    "#...#",
    "#...#",
    "####.",
    "#...#",
    "#...#",
    "####.",
];

const B2: [&str; LETTER_HEIGHT] = [
    "###..",
    "#..#.",
    "#..#.",
    "####.",
    "#...#",
    "#...#",
    "####.",
];

const C1: [&str; LETTER_HEIGHT] = [
    ".####",
    "#....",
    "#....",
    "#....",
    "#....",
    "#....",
    ".####",
];

const C2: [&str; LETTER_HEIGHT] = [
    "#####",
    "#....",
    "#....",
    "#....",
    "#....",
    "#....",
    "#####",
];

/// The letters that ship with hand-drawn exemplars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    C,
}

impl Letter {
    pub const ALL: [Letter; 3] = [Letter::A, Letter::B, Letter::C];

    /// Registry tag of the detector for this letter.
    pub fn tag(self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
        }
    }

    fn patterns(self) -> [&'static [&'static str]; 2] {
        match self {
            Letter::A => [&A1, &A2],
            Letter::B => [&B1, &B2],
            Letter::C => [&C1, &C2],
        }
    }

    /// The two hand-drawn `LETTER_WIDTH × LETTER_HEIGHT` exemplars of this letter.
    pub fn exemplars(self) -> Result<Vec<Grid>> {
        self.patterns().iter().map(|rows| Grid::from_pattern(rows)).collect()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Training set for a detector of `target`.
///
/// `negatives` random grids labeled `[0]`, followed by all six exemplars:
/// the two of `target` labeled `[1]`, the four others `[0]`. Two positives
/// against thousands of negatives leaves the detector reluctant to say
/// "match" on anything ambiguous; that skew is kept as is.
pub fn letter_training_set<R: Rng + ?Sized>(
    target: Letter,
    negatives: usize,
    rng: &mut R,
) -> Result<TrainingExampleSet> {
    let mut set = TrainingExampleSet::generate_negatives(LETTER_WIDTH * LETTER_HEIGHT, negatives, rng);

    for letter in Letter::ALL {
        for grid in letter.exemplars()? {
            set.push_grid(&grid, letter == target)?;
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn exemplars_have_the_letter_shape() {
        for letter in Letter::ALL {
            for grid in letter.exemplars().unwrap() {
                assert_eq!(grid.width(), LETTER_WIDTH);
                assert_eq!(grid.height(), LETTER_HEIGHT);
            }
        }
    }

    #[test]
    fn exemplars_are_distinct() {
        let vectors: Vec<Vec<f64>> = Letter::ALL
            .iter()
            .flat_map(|l| l.exemplars().unwrap())
            .map(|g| g.input_vector())
            .collect();
        assert_eq!(vectors.len(), 6);
        for (i, a) in vectors.iter().enumerate() {
            for b in &vectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn training_set_keeps_positives_scarce() {
        let mut rng = StdRng::seed_from_u64(12);
        let set = letter_training_set(Letter::C, 1000, &mut rng).unwrap();
        assert_eq!(set.len(), 1006);
        assert_eq!(set.positive_count(), 2);

        let c = Letter::C.exemplars().unwrap();
        let tail = &set.examples()[1004..];
        assert_eq!(tail[0].input, c[0].input_vector());
        assert_eq!(tail[0].output, vec![1.0]);
        assert_eq!(tail[1].output, vec![1.0]);
    }
}
