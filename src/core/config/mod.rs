//! Configuration types and management for codealign-rs.
//!
//! Every tunable of a run lives in [`CodealignConfig`]. Components never read
//! ambient state: the engine hands each one the section it needs, so a run is
//! reproducible from its configuration and its samples alone.

pub mod normalization;
pub mod pipeline;
pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{CodealignError, Result};

pub use normalization::{NormalizationConfig, SourceLanguage};
pub use pipeline::{AlignmentConfig, ClusteringConfig, FallbackPolicy, TemplateConfig};
pub use validation::{
    validate_bounded_usize, validate_finite, validate_non_empty, validate_optional_limit,
    validate_positive_usize,
};

/// Main configuration for the codealign engine
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CodealignConfig {
    /// Source normalization settings
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Pairwise alignment scoring
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// k-medoids clustering
    #[serde(default)]
    pub clustering: ClusteringConfig,

    /// Template synthesis
    #[serde(default)]
    pub templates: TemplateConfig,

    /// Sample ingestion from disk
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Performance and resource limits
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Loading, saving, and validation for [`CodealignConfig`].
impl CodealignConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            CodealignError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            CodealignError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.normalization.validate()?;
        self.alignment.validate()?;
        self.clustering.validate()?;
        self.templates.validate()?;
        self.ingest.validate()?;
        self.performance.validate()?;
        Ok(())
    }
}

/// Sample discovery settings used when reading a directory of sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Glob patterns (relative to the input directory) selecting sample files
    #[serde(default = "IngestConfig::default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// Glob patterns excluding files that the include patterns matched
    #[serde(default = "IngestConfig::default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Files larger than this are skipped (0 = unlimited)
    #[serde(default = "IngestConfig::default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
}

/// Default implementation for [`IngestConfig`].
impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            include_patterns: Self::default_include_patterns(),
            exclude_patterns: Self::default_exclude_patterns(),
            max_file_size_bytes: Self::default_max_file_size_bytes(),
        }
    }
}

/// Default values and validation for [`IngestConfig`].
impl IngestConfig {
    fn default_include_patterns() -> Vec<String> {
        vec!["**/*.py".to_string()]
    }

    fn default_exclude_patterns() -> Vec<String> {
        vec!["**/__pycache__/**".to_string()]
    }

    /// Default maximum file size: 500KB
    pub const fn default_max_file_size_bytes() -> u64 {
        500 * 1024
    }

    /// Validate ingest configuration
    pub fn validate(&self) -> Result<()> {
        if self.include_patterns.is_empty() {
            return Err(CodealignError::validation_field(
                "ingest.include_patterns must contain at least one pattern",
                "ingest.include_patterns",
            ));
        }
        for pattern in self.include_patterns.iter().chain(&self.exclude_patterns) {
            globset::Glob::new(pattern).map_err(|e| {
                CodealignError::config_field(
                    format!("Invalid glob pattern '{pattern}': {e}"),
                    "ingest",
                )
            })?;
        }
        Ok(())
    }
}

/// Performance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Worker threads for the rayon pool (None = rayon default)
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Score pairs and build templates in parallel
    #[serde(default = "PerformanceConfig::default_parallel")]
    pub parallel: bool,
}

/// Default implementation for [`PerformanceConfig`].
impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_threads: None,
            parallel: Self::default_parallel(),
        }
    }
}

/// Default values and validation for [`PerformanceConfig`].
impl PerformanceConfig {
    const fn default_parallel() -> bool {
        cfg!(feature = "parallel")
    }

    /// Validate performance configuration
    pub fn validate(&self) -> Result<()> {
        validate_optional_limit(self.max_threads, "performance.max_threads")
    }
}

#[cfg(test)]
mod tests;
