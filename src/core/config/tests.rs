use super::*;
use crate::core::errors::CodealignError;

fn expect_validation_error<T: std::fmt::Debug>(result: Result<T>) -> CodealignError {
    result.expect_err("expected validation failure")
}

#[test]
fn default_configs_validate_successfully() {
    CodealignConfig::default()
        .validate()
        .expect("codealign default");
    NormalizationConfig::default()
        .validate()
        .expect("normalization default");
    AlignmentConfig::default()
        .validate()
        .expect("alignment default");
    ClusteringConfig::default()
        .validate()
        .expect("clustering default");
    TemplateConfig::default()
        .validate()
        .expect("templates default");
    IngestConfig::default().validate().expect("ingest default");
}

#[test]
fn defaults_match_reference_pipeline() {
    let config = CodealignConfig::default();
    assert_eq!(config.alignment.match_score, 1.0);
    assert_eq!(config.alignment.mismatch_score, 0.0);
    assert_eq!(config.alignment.gap_score, 0.0);
    assert_eq!(config.clustering.k, 3);
    assert_eq!(config.templates.min_substring_length, 10);
    assert_eq!(config.templates.max_parts, 5);
    assert_eq!(config.templates.placeholder, "...");
    assert_eq!(config.templates.fallback, FallbackPolicy::FirstMember);
    assert_eq!(config.normalization.language, SourceLanguage::Python);
}

#[test]
fn clustering_config_rejects_zero_k() {
    let mut config = ClusteringConfig::default();
    config.k = 0;
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("clustering.k"));
}

#[test]
fn clustering_config_requires_iteration_cap() {
    let mut config = ClusteringConfig::default();
    config.max_iterations = 0;
    let err = expect_validation_error(config.validate());
    assert!(matches!(err, CodealignError::Validation { .. }));
}

#[test]
fn alignment_config_rejects_inverted_scheme() {
    let mut config = AlignmentConfig::default();
    config.mismatch_score = 2.0;
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("mismatch_score"));

    let mut config = AlignmentConfig::default();
    config.gap_score = f64::NAN;
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("gap_score"));
}

#[test]
fn alignment_config_rejects_positive_gap_score() {
    let mut config = AlignmentConfig::default();
    config.gap_score = 1.0;
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("gap_score"));

    config.gap_score = -1.0;
    assert!(config.validate().is_ok());
}

#[test]
fn alignment_config_rejects_zero_limits() {
    let mut config = AlignmentConfig::default();
    config.band_width = Some(0);
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("band_width"));

    config.band_width = Some(8);
    config.max_sequence_length = Some(0);
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("max_sequence_length"));
}

#[test]
fn template_config_requires_placeholder_and_length() {
    let mut config = TemplateConfig::default();
    config.placeholder.clear();
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("placeholder"));

    config.placeholder = "<*>".into();
    config.min_substring_length = 0;
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("min_substring_length"));
}

#[test]
fn ingest_config_rejects_bad_globs() {
    let mut config = IngestConfig::default();
    config.include_patterns = vec!["src/[".into()];
    let err = expect_validation_error(config.validate());
    assert!(matches!(err, CodealignError::Config { .. }));

    config.include_patterns.clear();
    let err = expect_validation_error(config.validate());
    assert!(format!("{err}").contains("include_patterns"));
}

#[test]
fn partial_yaml_fills_defaults() {
    let yaml = r#"
clustering:
  k: 4
templates:
  fallback: absent
normalization:
  language: text
"#;
    let config: CodealignConfig = serde_yaml::from_str(yaml).expect("parse yaml");
    assert_eq!(config.clustering.k, 4);
    assert_eq!(config.clustering.max_iterations, 100);
    assert_eq!(config.templates.fallback, FallbackPolicy::Absent);
    assert_eq!(config.templates.max_parts, 5);
    assert_eq!(config.normalization.language, SourceLanguage::Text);
    assert_eq!(config.normalization.comment_marker, "#");
}

#[test]
fn partial_ingest_section_keeps_default_excludes() {
    let yaml = r#"
ingest:
  include_patterns:
    - "src/**/*.py"
"#;
    let config: CodealignConfig = serde_yaml::from_str(yaml).expect("parse yaml");
    assert_eq!(config.ingest.include_patterns, vec!["src/**/*.py".to_string()]);
    assert_eq!(
        config.ingest.exclude_patterns,
        IngestConfig::default().exclude_patterns
    );
    assert_eq!(config.ingest.exclude_patterns, vec!["**/__pycache__/**".to_string()]);
    assert_eq!(config.ingest.max_file_size_bytes, 500 * 1024);
}

#[test]
fn yaml_file_round_trip_preserves_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("codealign.yml");

    let mut config = CodealignConfig::default();
    config.alignment.gap_score = -1.0;
    config.templates.placeholder = "<*>".into();
    config.to_yaml_file(&path).expect("write config");

    let loaded = CodealignConfig::from_yaml_file(&path).expect("read config");
    assert_eq!(loaded.alignment.gap_score, -1.0);
    assert_eq!(loaded.templates.placeholder, "<*>");
}

#[test]
fn missing_config_file_is_io_error() {
    let err = CodealignConfig::from_yaml_file("/definitely/not/here.yml").unwrap_err();
    assert!(matches!(err, CodealignError::Io { .. }));
}
