//! Sample ingestion from directories and JSON manifests.

use std::fs;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::config::IngestConfig;
use crate::core::errors::{CodealignError, Result, ResultExt};
use crate::core::sample::{ensure_unique_ids, SourceSample};

/// Read every matching file under `root` as one sample.
///
/// Identifiers are `/`-separated paths relative to `root`. Files are visited in
/// file-name order so the batch order is stable across runs. Empty, oversized,
/// and non-UTF-8 files are skipped with a warning.
pub fn load_samples_from_dir(root: &Path, config: &IngestConfig) -> Result<Vec<SourceSample>> {
    if !root.is_dir() {
        return Err(CodealignError::validation(format!(
            "Path is not a directory: {}",
            root.display()
        )));
    }

    let include = compile_globset(&config.include_patterns)?;
    let exclude = compile_globset(&config.exclude_patterns)?;
    info!("Loading samples from {}", root.display());

    let mut samples = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Failed to walk directory: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let id = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if !include.as_ref().is_some_and(|set| set.is_match(&id)) {
            continue;
        }
        if exclude.as_ref().is_some_and(|set| set.is_match(&id)) {
            debug!(sample = %id, "Excluded by pattern");
            continue;
        }

        if config.max_file_size_bytes > 0 {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > config.max_file_size_bytes {
                warn!(sample = %id, size, "Skipping file above size limit");
                continue;
            }
        }

        let bytes = fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        let Ok(text) = String::from_utf8(bytes) else {
            warn!(sample = %id, "Skipping file with invalid UTF-8");
            continue;
        };

        match SourceSample::new(id.clone(), text) {
            Ok(sample) => samples.push(sample),
            Err(_) => warn!(sample = %id, "Skipping empty file"),
        }
    }

    info!(samples = samples.len(), "Loaded samples from directory");
    Ok(samples)
}

/// Read a JSON array of `{"id": ..., "text": ...}` objects.
///
/// Unlike directory ingestion every entry must be valid: an empty id, blank
/// text, or a repeated id fails the whole manifest.
pub fn load_samples_from_manifest(path: &Path) -> Result<Vec<SourceSample>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let samples = parse_manifest(&content)?;
    info!(samples = samples.len(), "Loaded samples from {}", path.display());
    Ok(samples)
}

/// Parse manifest JSON already in memory
pub fn parse_manifest(content: &str) -> Result<Vec<SourceSample>> {
    let samples: Vec<SourceSample> = serde_json::from_str(content)?;
    ensure_unique_ids(&samples)?;
    Ok(samples)
}

fn compile_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    let mut builder = GlobSetBuilder::new();
    let mut added = false;

    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }

        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()
            .map_err(|err| {
                CodealignError::config(format!("Invalid glob pattern '{pattern}': {err}"))
            })?;
        builder.add(glob);
        added = true;
    }

    if added {
        builder.build().map(Some).map_err(Into::into)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &[u8]) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_loads_matching_files_in_name_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b/scanner.py", b"class Scanner: pass\n");
        write(temp.path(), "a.py", b"x = 1\n");
        write(temp.path(), "notes.txt", b"not python\n");
        write(temp.path(), "b/__pycache__/scanner.py", b"cached = 1\n");

        let samples = load_samples_from_dir(temp.path(), &IngestConfig::default()).unwrap();
        let ids: Vec<&str> = samples.iter().map(SourceSample::id).collect();
        assert_eq!(ids, vec!["a.py", "b/scanner.py"]);
        assert_eq!(samples[0].raw_text(), "x = 1\n");
    }

    #[test]
    fn test_skips_empty_oversized_and_binary_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "empty.py", b"   \n");
        write(temp.path(), "binary.py", &[0xff, 0xfe, 0x00]);
        write(temp.path(), "big.py", "x = 1\n".repeat(100).as_bytes());
        write(temp.path(), "ok.py", b"y = 2\n");

        let config = IngestConfig {
            max_file_size_bytes: 64,
            ..IngestConfig::default()
        };
        let samples = load_samples_from_dir(temp.path(), &config).unwrap();
        let ids: Vec<&str> = samples.iter().map(SourceSample::id).collect();
        assert_eq!(ids, vec!["ok.py"]);
    }

    #[test]
    fn test_custom_patterns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.py", b"x = 1\n");
        write(temp.path(), "b.lox", b"print 1;\n");

        let config = IngestConfig {
            include_patterns: vec!["*.lox".to_string()],
            ..IngestConfig::default()
        };
        let samples = load_samples_from_dir(temp.path(), &config).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].id(), "b.lox");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(load_samples_from_dir(&missing, &IngestConfig::default()).is_err());
    }

    #[test]
    fn test_manifest_round_trip_and_validation() {
        let samples = parse_manifest(
            r#"[{"id": "a", "text": "x = 1"}, {"id": "b", "text": "y = 2"}]"#,
        )
        .unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].id(), "b");

        assert!(parse_manifest(r#"[{"id": "a", "text": ""}]"#).is_err());
        assert!(matches!(
            parse_manifest(r#"[{"id": "a", "text": "x"}, {"id": "a", "text": "y"}]"#),
            Err(CodealignError::Validation { .. })
        ));
    }

    #[test]
    fn test_manifest_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("samples.json");
        fs::write(&path, r#"[{"id": "repo1", "text": "def f(): pass"}]"#).unwrap();
        let samples = load_samples_from_manifest(&path).unwrap();
        assert_eq!(samples[0].id(), "repo1");

        let missing = load_samples_from_manifest(&temp.path().join("missing.json"));
        assert!(matches!(missing, Err(CodealignError::Io { .. })));
    }
}
