//! Global sequence alignment between normalized code strings.
//!
//! Scores come from a Needleman-Wunsch recurrence with a linear gap model.
//! Only the optimal score is needed, never the alignment itself, so the DP
//! table is kept as two rolling rows. Pairwise cost is still
//! O(|a| * |b|) time; with N samples the score matrix costs O(N^2 * L^2), which
//! is why [`GlobalAligner`] supports prefix truncation and diagonal banding.

pub mod matrix;

use serde::{Deserialize, Serialize};

use crate::core::config::AlignmentConfig;
use crate::detectors::normalization::NormalizedSequence;

pub use matrix::{DistanceMatrix, ScoreMatrix};

/// Linear substitution and gap scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringScheme {
    /// Identical characters
    pub match_score: f64,
    /// Different characters
    pub mismatch_score: f64,
    /// A character against a gap
    pub gap_score: f64,
}

/// Default implementation for [`ScoringScheme`].
impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 1.0,
            mismatch_score: 0.0,
            gap_score: 0.0,
        }
    }
}

impl ScoringScheme {
    #[inline]
    fn substitution(&self, a: char, b: char) -> f64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// Global aligner over the characters of two strings.
#[derive(Debug, Clone, Default)]
pub struct GlobalAligner {
    scheme: ScoringScheme,
    max_sequence_length: Option<usize>,
    band_width: Option<usize>,
}

impl GlobalAligner {
    /// Create an aligner with an explicit scheme and no scale limits
    pub fn new(scheme: ScoringScheme) -> Self {
        Self {
            scheme,
            max_sequence_length: None,
            band_width: None,
        }
    }

    /// Create an aligner from configuration
    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self {
            scheme: ScoringScheme {
                match_score: config.match_score,
                mismatch_score: config.mismatch_score,
                gap_score: config.gap_score,
            },
            max_sequence_length: config.max_sequence_length,
            band_width: config.band_width,
        }
    }

    /// Truncate both inputs to this many characters before aligning
    pub fn with_max_sequence_length(mut self, max_length: usize) -> Self {
        self.max_sequence_length = Some(max_length);
        self
    }

    /// Restrict the DP to cells with `|i - j| <= band`
    ///
    /// The band is widened to the length difference when needed so the
    /// end-to-end cell stays reachable.
    pub fn with_band_width(mut self, band: usize) -> Self {
        self.band_width = Some(band);
        self
    }

    /// Scoring scheme in use
    pub fn scheme(&self) -> ScoringScheme {
        self.scheme
    }

    /// Align two normalized sequences
    pub fn score_sequences(&self, a: &NormalizedSequence, b: &NormalizedSequence) -> f64 {
        self.score(&a.text, &b.text)
    }

    /// Highest score a pair with these lengths could reach.
    ///
    /// A tight bound for validated schemes, where the gap score is never positive and
    /// a mismatch never outscores a match.
    pub fn max_possible_score(&self, len_a: usize, len_b: usize) -> f64 {
        let (len_a, len_b) = match self.max_sequence_length {
            Some(limit) => (len_a.min(limit), len_b.min(limit)),
            None => (len_a, len_b),
        };
        let shared = len_a.min(len_b) as f64;
        let overhang = len_a.abs_diff(len_b) as f64;
        shared * self.scheme.match_score + overhang * self.scheme.gap_score
    }

    /// Optimal global alignment score of `a` against `b`.
    ///
    /// Total over all inputs: an empty string aligns against `b` with
    /// `gap_score * |b|`.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let limit = self.max_sequence_length.unwrap_or(usize::MAX);
        let mut rows: Vec<char> = a.chars().take(limit).collect();
        let mut cols: Vec<char> = b.chars().take(limit).collect();
        // Keep the shorter sequence along the rolling rows.
        if cols.len() > rows.len() {
            std::mem::swap(&mut rows, &mut cols);
        }
        self.banded_score(&rows, &cols)
    }

    fn banded_score(&self, rows: &[char], cols: &[char]) -> f64 {
        let n = rows.len();
        let m = cols.len();
        let gap = self.scheme.gap_score;
        let band = match self.band_width {
            Some(width) => width.max(n.abs_diff(m)),
            None => n.max(m),
        };

        let mut prev: Vec<f64> = (0..=m)
            .map(|j| {
                if j <= band {
                    gap * j as f64
                } else {
                    f64::NEG_INFINITY
                }
            })
            .collect();
        let mut curr = vec![f64::NEG_INFINITY; m + 1];

        for i in 1..=n {
            let lo = i.saturating_sub(band).max(1);
            let hi = (i + band).min(m);

            curr[lo - 1] = if lo == 1 && i <= band {
                gap * i as f64
            } else {
                f64::NEG_INFINITY
            };

            for j in lo..=hi {
                let diagonal = prev[j - 1] + self.scheme.substitution(rows[i - 1], cols[j - 1]);
                let up = prev[j] + gap;
                let left = curr[j - 1] + gap;
                curr[j] = diagonal.max(up).max(left);
            }
            if hi < m {
                curr[hi + 1] = f64::NEG_INFINITY;
            }

            std::mem::swap(&mut prev, &mut curr);
        }

        prev[m]
    }
}
