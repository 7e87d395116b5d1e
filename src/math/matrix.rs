use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major weight matrix.
///
/// A layer with `input_size` inputs and `size` neurons stores its weights as
/// an `input_size × size` matrix, so row `i` holds every weight leaving input
/// `i` and column `j` holds every weight entering neuron `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Samples every entry uniformly from `[-bound, bound)`.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, bound: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for row in res.data.iter_mut() {
            for value in row.iter_mut() {
                *value = rng.gen::<f64>() * 2.0 * bound - bound;
            }
        }

        res
    }

    /// Builds a matrix from row vectors. Returns `None` when the rows are ragged.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let cols = data.first().map(Vec::len).unwrap_or(0);
        if data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix { rows: data.len(), cols, data })
    }

    /// True when `rows`/`cols` agree with the stored data and every entry is finite.
    ///
    /// Deserialized matrices carry all three fields independently, so they
    /// have to be checked before use.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.rows
            && self.data.iter().all(|row| {
                row.len() == self.cols && row.iter().all(|x| x.is_finite())
            })
    }

    /// Row vector times matrix: `vᵀ · M`, with `v.len() == rows`.
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut res = vec![0.0; self.cols];

        for (row, &x) in self.data.iter().zip(v) {
            if x == 0.0 {
                continue;
            }
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += x * w;
            }
        }

        res
    }

    /// Matrix times column vector: `M · v`, with `v.len() == cols`.
    pub fn right_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        self.data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Adds `scale · a ⊗ b` in place, where `a.len() == rows` and `b.len() == cols`.
    pub fn add_outer(&mut self, a: &[f64], b: &[f64], scale: f64) {
        debug_assert_eq!(a.len(), self.rows);
        debug_assert_eq!(b.len(), self.cols);

        for (row, &x) in self.data.iter_mut().zip(a) {
            let factor = scale * x;
            if factor == 0.0 {
                continue;
            }
            for (w, &y) in row.iter_mut().zip(b) {
                *w += factor * y;
            }
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}
