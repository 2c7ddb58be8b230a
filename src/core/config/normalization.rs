//! Normalization configuration types.

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

use super::validation::validate_non_empty;

/// Source language used to pick a structural stripper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    /// Python source; stripped structurally through tree-sitter
    #[default]
    Python,
    /// Arbitrary text; only comment stripping applies
    Text,
}

/// Stable string key for [`SourceLanguage`].
impl SourceLanguage {
    /// Returns the lowercase language key.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
            SourceLanguage::Text => "text",
        }
    }
}

/// Configuration for turning raw source text into canonical token strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Language of the samples
    #[serde(default)]
    pub language: SourceLanguage,

    /// Remove leading doc-strings from module, function, and class bodies
    #[serde(default = "NormalizationConfig::default_true")]
    pub strip_docstrings: bool,

    /// Remove parameter, return, and assignment type annotations
    #[serde(default = "NormalizationConfig::default_true")]
    pub strip_type_annotations: bool,

    /// End-of-line comment marker
    #[serde(default = "NormalizationConfig::default_comment_marker")]
    pub comment_marker: String,

    /// Only keep the source of this class (from `class <name>` to the next class)
    #[serde(default)]
    pub extract_class: Option<String>,
}

/// Default implementation for [`NormalizationConfig`].
impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            language: SourceLanguage::default(),
            strip_docstrings: true,
            strip_type_annotations: true,
            comment_marker: Self::default_comment_marker(),
            extract_class: None,
        }
    }
}

/// Default values and validation for [`NormalizationConfig`].
impl NormalizationConfig {
    const fn default_true() -> bool {
        true
    }

    fn default_comment_marker() -> String {
        "#".to_string()
    }

    /// Validate normalization configuration
    pub fn validate(&self) -> Result<()> {
        validate_non_empty(&self.comment_marker, "normalization.comment_marker")?;
        if let Some(name) = &self.extract_class {
            validate_non_empty(name, "normalization.extract_class")?;
        }
        Ok(())
    }
}
