//! Report rendering for analysis results.
//!
//! Reports are rendered to strings; writing them anywhere is the caller's job.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::results::AnalysisResults;
use crate::core::errors::{CodealignError, Result};

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pretty-printed JSON of the full results
    #[default]
    Json,
    /// YAML of the full results
    Yaml,
    /// Human-readable templates, assignment table, and normalized samples
    Text,
}

impl ReportFormat {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Text => "txt",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = CodealignError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "text" | "txt" => Ok(Self::Text),
            other => Err(CodealignError::config_field(
                format!("Unsupported report format '{other}'"),
                "format",
            )),
        }
    }
}

/// Render `results` in `format`
pub fn render_report(results: &AnalysisResults, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(results)?),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(results)?),
        ReportFormat::Text => Ok(render_text(results)),
    }
}

fn render_text(results: &AnalysisResults) -> String {
    let mut out = String::new();

    for template in &results.templates {
        let members = results
            .clusters
            .get(template.cluster_id)
            .map_or(0, |cluster| cluster.member_ids.len());
        let _ = writeln!(out, "=== Cluster {} Template ===", template.cluster_id);
        let _ = writeln!(out, "# {members} member(s), {:?}", template.kind);
        let _ = writeln!(out, "{}\n", template.render());
    }

    let id_width = results
        .samples
        .iter()
        .map(|sample| sample.id.chars().count())
        .chain(std::iter::once("Sample".len()))
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "{:<id_width$}  Cluster  Length", "Sample");
    for sample in &results.samples {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:>7}  {:>6}",
            sample.id, sample.cluster_id, sample.normalized_length
        );
    }
    out.push('\n');

    for (index, sample) in results.samples.iter().enumerate() {
        let _ = writeln!(out, "=== Sample {index} from {} ===", sample.id);
        let _ = writeln!(out, "{}\n", sample.normalized);
    }

    out
}
