//! Source normalization into canonical token strings.
//!
//! Normalization runs five steps in a fixed order: structural stripping
//! (doc-strings and type annotations, via the language's tree-sitter grammar),
//! end-of-line comment removal, tokenization, case folding with suffix stemming,
//! and separator-free concatenation. The result depends only on the raw text and
//! the normalization configuration.

pub mod stemming;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::NormalizationConfig;
use crate::core::errors::Result;
use crate::core::sample::{SampleId, SourceSample};
use crate::lang::{extract_class_source, stripper_for_language, StripOptions, StructuralStripper};

pub use stemming::stem;
pub use tokenizer::{strip_comments, tokenize};

/// Canonical token form of one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSequence {
    /// Identifier of the originating sample
    pub sample_id: SampleId,

    /// Stemmed, lowercased tokens in source order
    pub tokens: Vec<String>,

    /// Tokens concatenated without separators
    pub text: String,
}

impl NormalizedSequence {
    /// Build a sequence from already-normalized tokens
    pub fn from_tokens(sample_id: impl Into<SampleId>, tokens: Vec<String>) -> Self {
        let text = tokens.concat();
        Self {
            sample_id: sample_id.into(),
            tokens,
            text,
        }
    }

    /// Length of the canonical text in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether normalization left nothing behind
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for NormalizedSequence {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Turns raw source text into [`NormalizedSequence`]s.
///
/// Holds a tree-sitter parser, so each thread needs its own instance.
pub struct CodeNormalizer {
    config: NormalizationConfig,
    stripper: Box<dyn StructuralStripper>,
}

impl CodeNormalizer {
    /// Create a normalizer for the configured language
    pub fn new(config: NormalizationConfig) -> Result<Self> {
        let stripper = stripper_for_language(config.language)?;
        Ok(Self { config, stripper })
    }

    /// Normalize one sample
    pub fn normalize(&mut self, sample: &SourceSample) -> NormalizedSequence {
        let tokens = self.normalize_tokens(sample.raw_text());
        NormalizedSequence::from_tokens(sample.id(), tokens)
    }

    /// Normalize raw text to its canonical string
    pub fn normalize_text(&mut self, raw_text: &str) -> String {
        self.normalize_tokens(raw_text).concat()
    }

    fn normalize_tokens(&mut self, raw_text: &str) -> Vec<String> {
        let source = match self.config.extract_class.as_deref() {
            Some(name) => extract_class_source(raw_text, name).unwrap_or_else(|| {
                debug!(class = name, "Class not found; normalizing whole sample");
                raw_text
            }),
            None => raw_text,
        };

        let stripped = self.strip_structure(source);
        let uncommented = strip_comments(&stripped, &self.config.comment_marker);

        tokenize(&uncommented).into_iter().map(stem).collect()
    }

    /// Structural stripping; on a parse failure the text passes through untouched.
    fn strip_structure(&mut self, source: &str) -> String {
        let options = StripOptions {
            docstrings: self.config.strip_docstrings,
            type_annotations: self.config.strip_type_annotations,
        };
        if !options.docstrings && !options.type_annotations {
            return source.to_string();
        }

        match self.stripper.strip(source, options) {
            Ok(stripped) => stripped,
            Err(e) => {
                debug!(
                    language = self.stripper.language(),
                    error = %e,
                    "Structural stripping failed; using raw text"
                );
                source.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SourceLanguage;
    use proptest::prelude::*;

    fn normalizer() -> CodeNormalizer {
        CodeNormalizer::new(NormalizationConfig::default()).expect("python normalizer")
    }

    #[test]
    fn test_spacing_variants_normalize_identically() {
        let mut normalizer = normalizer();
        let compact = normalizer.normalize_text("if x==1: return x");
        let spaced = normalizer.normalize_text("if x == 1 : return x");
        assert_eq!(compact, "ifx==:returnx");
        assert_eq!(compact, spaced);
    }

    #[test]
    fn test_full_pipeline_strips_docs_annotations_and_comments() {
        let mut normalizer = normalizer();
        let annotated = r#"
class Scanner:
    """Turns source into tokens."""

    def scan_tokens(self, source: str) -> list:
        # walk every character
        tokens: list = []
        return tokens
"#;
        let plain = r#"
class Scanner:
    def scan_tokens(self, source):
        tokens = []
        return tokens
"#;
        let normalized = normalizer.normalize_text(annotated);
        assert_eq!(normalized, normalizer.normalize_text(plain));
        assert_eq!(
            normalized,
            "classscann:defscan_tokens(self,source):tokens=[]returntokens"
        );
    }

    #[test]
    fn test_malformed_python_falls_back_to_raw_text() {
        let mut normalizer = normalizer();
        let broken = "def scan(self, x: int:\n    return x  # oops";
        assert_eq!(
            normalizer.normalize_text(broken),
            "defscan(self,x:int:returnx"
        );
    }

    #[test]
    fn test_text_language_only_strips_comments() {
        let config = NormalizationConfig {
            language: SourceLanguage::Text,
            ..NormalizationConfig::default()
        };
        let mut normalizer = CodeNormalizer::new(config).unwrap();
        assert_eq!(
            normalizer.normalize_text("x: int = 1 # typed"),
            "x:int="
        );
    }

    #[test]
    fn test_extract_class_limits_scope() {
        let config = NormalizationConfig {
            extract_class: Some("Scanner".into()),
            ..NormalizationConfig::default()
        };
        let mut normalizer = CodeNormalizer::new(config).unwrap();
        let source = "import os\nclass Scanner:\n    pass\nclass Parser:\n    pass\n";
        assert_eq!(normalizer.normalize_text(source), "classscann:pass");
    }

    #[test]
    fn test_normalize_sample_records_tokens() {
        let mut normalizer = normalizer();
        let sample = SourceSample::new("repo/a", "def add(a, b): return a + b").unwrap();
        let sequence = normalizer.normalize(&sample);
        assert_eq!(sequence.sample_id, "repo/a");
        assert_eq!(sequence.tokens.concat(), sequence.text);
        assert_eq!(sequence.text, "defadd(a,b):returna+b");
        assert_eq!(sequence.len(), sequence.text.chars().count());
    }

    proptest! {
        #[test]
        fn prop_normalize_is_deterministic(source in "[ -~\n]{0,200}") {
            let mut first = normalizer();
            let mut second = normalizer();
            let a = first.normalize_text(&source);
            prop_assert_eq!(&a, &first.normalize_text(&source));
            prop_assert_eq!(a, second.normalize_text(&source));
        }

        #[test]
        fn prop_normalized_text_has_no_whitespace(source in "[ -~\n\t]{0,200}") {
            let mut normalizer = normalizer();
            let normalized = normalizer.normalize_text(&source);
            prop_assert!(!normalized.chars().any(char::is_whitespace));
        }
    }
}
