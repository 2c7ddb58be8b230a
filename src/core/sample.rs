//! Source samples: the raw input of a similarity run.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::errors::{CodealignError, Result};

/// Unique identifier for samples (e.g. a repository name or relative path)
pub type SampleId = String;

/// One raw source-code sample supplied by the caller.
///
/// Samples are validated when constructed and immutable afterwards; the
/// pipeline refers to them by their position in the input batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct SourceSample {
    id: SampleId,
    #[serde(rename = "text")]
    raw_text: String,
}

impl SourceSample {
    /// Create a sample, rejecting empty identifiers and blank text
    pub fn new(id: impl Into<SampleId>, raw_text: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let raw_text = raw_text.into();

        if id.trim().is_empty() {
            return Err(CodealignError::validation_field(
                "sample identifier must not be empty",
                "id",
            ));
        }
        if raw_text.trim().is_empty() {
            return Err(CodealignError::validation_field(
                format!("sample '{id}' has no text"),
                id,
            ));
        }

        Ok(Self { id, raw_text })
    }

    /// Sample identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw, unnormalized source text
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// Unvalidated wire form of [`SourceSample`].
#[derive(Deserialize)]
struct RawSample {
    id: String,
    text: String,
}

impl TryFrom<RawSample> for SourceSample {
    type Error = CodealignError;

    fn try_from(raw: RawSample) -> Result<Self> {
        SourceSample::new(raw.id, raw.text)
    }
}

/// Reject batches in which two samples share an identifier.
pub fn ensure_unique_ids(samples: &[SourceSample]) -> Result<()> {
    let mut seen = AHashSet::with_capacity(samples.len());
    for sample in samples {
        if !seen.insert(sample.id()) {
            return Err(CodealignError::validation_field(
                format!("duplicate sample identifier '{}'", sample.id()),
                sample.id(),
            ));
        }
    }
    Ok(())
}
