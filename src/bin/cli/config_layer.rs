//! Configuration Layer Management
//!
//! Layers, lowest priority first: built-in defaults, the configuration file
//! (explicit `--config` or an implicit `.codealign.yml`/`.codealign.yaml`),
//! then CLI overrides.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::AnalyzeArgs;
use codealign_rs::core::config::CodealignConfig;

/// Implicit configuration files looked up in the working directory
pub const IMPLICIT_CONFIG_FILES: [&str; 2] = [".codealign.yml", ".codealign.yaml"];

/// Apply CLI overrides on top of a loaded configuration
pub trait ApplyCliOverrides<T> {
    /// Overwrite every setting the CLI specified explicitly
    fn apply_cli_overrides(&mut self, args: &T);
}

impl ApplyCliOverrides<AnalyzeArgs> for CodealignConfig {
    fn apply_cli_overrides(&mut self, args: &AnalyzeArgs) {
        if let Some(k) = args.k {
            self.clustering.k = k;
        }
        if let Some(min_length) = args.min_length {
            self.templates.min_substring_length = min_length;
        }
        if !args.patterns.is_empty() {
            self.ingest.include_patterns = args.patterns.clone();
        }
        if let Some(class_name) = &args.extract_class {
            self.normalization.extract_class = Some(class_name.clone());
        }
        if let Some(threads) = args.threads {
            self.performance.max_threads = Some(threads);
        }
    }
}

/// Locate the configuration file to load, if any
pub fn resolve_config_path(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    IMPLICIT_CONFIG_FILES
        .iter()
        .map(|name| working_dir.join(name))
        .find(|path| path.exists())
}

/// Load a configuration file, or defaults when there is none
pub fn load_configuration(path: Option<&Path>) -> anyhow::Result<CodealignConfig> {
    match path {
        Some(path) => CodealignConfig::from_yaml_file(path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            )
        }),
        None => Ok(CodealignConfig::default()),
    }
}

/// Build the validated configuration for an `analyze` run
pub fn build_layered_config(
    args: &AnalyzeArgs,
    working_dir: &Path,
) -> anyhow::Result<CodealignConfig> {
    let config_path = resolve_config_path(args.config.as_deref(), working_dir);
    if let Some(path) = &config_path {
        debug!("Using configuration file {}", path.display());
    }

    let mut config = load_configuration(config_path.as_deref())?;
    config.apply_cli_overrides(args);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}
