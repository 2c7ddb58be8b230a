//! Alignment, clustering, and template configuration types.

use serde::{Deserialize, Serialize};

use crate::core::errors::{CodealignError, Result};

use super::validation::{
    validate_bounded_usize, validate_finite, validate_non_empty, validate_optional_limit,
    validate_positive_usize,
};

/// Linear scoring scheme and scale controls for global alignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Score added for two identical characters
    #[serde(default = "AlignmentConfig::default_match_score")]
    pub match_score: f64,

    /// Score added for two different characters
    #[serde(default)]
    pub mismatch_score: f64,

    /// Score added for each character aligned against a gap
    #[serde(default)]
    pub gap_score: f64,

    /// Truncate both sequences to this many characters before aligning
    #[serde(default)]
    pub max_sequence_length: Option<usize>,

    /// Restrict the DP table to a diagonal band of this half-width
    #[serde(default)]
    pub band_width: Option<usize>,
}

/// Default implementation for [`AlignmentConfig`].
impl Default for AlignmentConfig {
    /// Match 1, mismatch 0, gap 0: the score is the longest common subsequence length.
    fn default() -> Self {
        Self {
            match_score: Self::default_match_score(),
            mismatch_score: 0.0,
            gap_score: 0.0,
            max_sequence_length: None,
            band_width: None,
        }
    }
}

/// Default values and validation for [`AlignmentConfig`].
impl AlignmentConfig {
    const fn default_match_score() -> f64 {
        1.0
    }

    /// Validate alignment configuration
    pub fn validate(&self) -> Result<()> {
        validate_finite(self.match_score, "alignment.match_score")?;
        validate_finite(self.mismatch_score, "alignment.mismatch_score")?;
        validate_finite(self.gap_score, "alignment.gap_score")?;
        if self.mismatch_score > self.match_score {
            return Err(CodealignError::validation_field(
                "alignment.mismatch_score must not exceed alignment.match_score",
                "alignment.mismatch_score",
            ));
        }
        if self.gap_score > 0.0 {
            return Err(CodealignError::validation_field(
                "alignment.gap_score must not be positive",
                "alignment.gap_score",
            ));
        }
        validate_optional_limit(self.max_sequence_length, "alignment.max_sequence_length")?;
        validate_optional_limit(self.band_width, "alignment.band_width")?;
        Ok(())
    }
}

/// k-medoids clustering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Requested number of clusters (clamped to the sample count at run time)
    #[serde(default = "ClusteringConfig::default_k")]
    pub k: usize,

    /// Hard cap on assignment/update iterations
    #[serde(default = "ClusteringConfig::default_max_iterations")]
    pub max_iterations: usize,
}

/// Default implementation for [`ClusteringConfig`].
impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: Self::default_k(),
            max_iterations: Self::default_max_iterations(),
        }
    }
}

/// Default values and validation for [`ClusteringConfig`].
impl ClusteringConfig {
    const fn default_k() -> usize {
        3
    }

    const fn default_max_iterations() -> usize {
        100
    }

    /// Validate clustering configuration
    pub fn validate(&self) -> Result<()> {
        validate_positive_usize(self.k, "clustering.k")?;
        validate_bounded_usize(self.max_iterations, 1, 100_000, "clustering.max_iterations")?;
        Ok(())
    }
}

/// What a cluster's template becomes when its members share no substring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Use the first member's normalized sequence verbatim
    #[default]
    FirstMember,
    /// Emit an explicitly absent template
    Absent,
}

/// Template synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Shortest common substring worth reporting
    #[serde(default = "TemplateConfig::default_min_substring_length")]
    pub min_substring_length: usize,

    /// Number of longest common substrings joined into a template
    #[serde(default = "TemplateConfig::default_max_parts")]
    pub max_parts: usize,

    /// Placeholder written before, between, and after template parts
    #[serde(default = "TemplateConfig::default_placeholder")]
    pub placeholder: String,

    /// Behaviour when no common substring exists
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Cap on the mined base sequence length
    #[serde(default)]
    pub max_base_length: Option<usize>,
}

/// Default implementation for [`TemplateConfig`].
impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            min_substring_length: Self::default_min_substring_length(),
            max_parts: Self::default_max_parts(),
            placeholder: Self::default_placeholder(),
            fallback: FallbackPolicy::default(),
            max_base_length: None,
        }
    }
}

/// Default values and validation for [`TemplateConfig`].
impl TemplateConfig {
    const fn default_min_substring_length() -> usize {
        10
    }

    const fn default_max_parts() -> usize {
        5
    }

    fn default_placeholder() -> String {
        "...".to_string()
    }

    /// Validate template configuration
    pub fn validate(&self) -> Result<()> {
        validate_positive_usize(self.min_substring_length, "templates.min_substring_length")?;
        validate_positive_usize(self.max_parts, "templates.max_parts")?;
        validate_non_empty(&self.placeholder, "templates.placeholder")?;
        validate_optional_limit(self.max_base_length, "templates.max_base_length")?;
        Ok(())
    }
}
