//! Pairwise score and distance matrices.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::GlobalAligner;
use crate::core::errors::{CodealignError, Result};
use crate::detectors::normalization::NormalizedSequence;

/// Symmetric N x N table of pairwise alignment scores.
///
/// The diagonal is stored as zero and carries no meaning; nothing reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct ScoreMatrix {
    scores: Array2<f64>,
}

impl ScoreMatrix {
    /// Align every unordered pair once and mirror the result.
    ///
    /// Each pair is scored independently; the parallel collect is the barrier
    /// after which cells are written, one pair to its two mirrored cells.
    pub fn compute(
        sequences: &[NormalizedSequence],
        aligner: &GlobalAligner,
        parallel: bool,
    ) -> Self {
        let n = sequences.len();
        let mut scores = Array2::zeros((n, n));
        if n < 2 {
            return Self { scores };
        }

        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        info!(
            samples = n,
            pairs = pairs.len(),
            parallel,
            "Computing pairwise alignment scores"
        );

        let score_pair = |&(i, j): &(usize, usize)| {
            (i, j, aligner.score_sequences(&sequences[i], &sequences[j]))
        };
        let scored: Vec<(usize, usize, f64)> = if parallel {
            pairs.par_iter().map(score_pair).collect()
        } else {
            pairs.iter().map(score_pair).collect()
        };

        for (i, j, score) in scored {
            scores[[i, j]] = score;
            scores[[j, i]] = score;
        }

        debug!(samples = n, "Score matrix complete");
        Self { scores }
    }

    /// Build a matrix from explicit rows, validating shape and symmetry
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let scores = square_from_rows(rows, "score matrix")?;
        let n = scores.nrows();
        for i in 0..n {
            for j in (i + 1)..n {
                if scores[[i, j]] != scores[[j, i]] {
                    return Err(CodealignError::validation(format!(
                        "score matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(Self { scores })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    /// Whether the matrix covers no samples
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of pair `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[[i, j]]
    }

    /// Underlying array
    pub fn as_array(&self) -> &Array2<f64> {
        &self.scores
    }

    /// Largest off-diagonal score, `None` with fewer than two samples
    pub fn max_score(&self) -> Option<f64> {
        self.scores
            .indexed_iter()
            .filter(|((i, j), _)| i != j)
            .map(|(_, &score)| score)
            .reduce(f64::max)
    }

    /// Derive `distance[i][j] = max_score - score[i][j]`
    pub fn to_distance(&self) -> DistanceMatrix {
        let n = self.len();
        let Some(max_score) = self.max_score() else {
            return DistanceMatrix {
                distances: Array2::zeros((n, n)),
            };
        };

        let distances = Array2::from_shape_fn((n, n), |(i, j)| {
            if i == j {
                0.0
            } else {
                max_score - self.scores[[i, j]]
            }
        });
        DistanceMatrix { distances }
    }

    /// Rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.scores.outer_iter().map(|row| row.to_vec()).collect()
    }
}

impl From<ScoreMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ScoreMatrix) -> Self {
        matrix.to_rows()
    }
}

impl TryFrom<Vec<Vec<f64>>> for ScoreMatrix {
    type Error = CodealignError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

/// Non-negative dissimilarities derived from a [`ScoreMatrix`].
///
/// Zero means the pair attains the best observed similarity; the diagonal is
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    distances: Array2<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from explicit rows
    ///
    /// Rejects non-square input and negative or non-finite entries; the
    /// diagonal is forced to zero.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let mut distances = square_from_rows(rows, "distance matrix")?;
        if let Some(bad) = distances.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(CodealignError::validation(format!(
                "distance matrix entries must be finite and non-negative, found {bad}"
            )));
        }
        distances.diag_mut().fill(0.0);
        Ok(Self { distances })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    /// Whether the matrix covers no samples
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance between `i` and `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    /// Underlying array
    pub fn as_array(&self) -> &Array2<f64> {
        &self.distances
    }

    /// Rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.distances.outer_iter().map(|row| row.to_vec()).collect()
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.to_rows()
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = CodealignError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

fn square_from_rows(rows: Vec<Vec<f64>>, what: &str) -> Result<Array2<f64>> {
    let n = rows.len();
    if let Some(row) = rows.iter().find(|row| row.len() != n) {
        return Err(CodealignError::validation(format!(
            "{what} must be square: expected {n} columns, found {}",
            row.len()
        )));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n, n), flat)
        .map_err(|e| CodealignError::internal(format!("{what} shape error: {e}")))
}
