//! Console summaries and report writing.

use std::path::Path;

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use codealign_rs::core::config::CodealignConfig;
use codealign_rs::io::reports::{render_report, ReportFormat};
use codealign_rs::AnalysisResults;

/// Print per-cluster sizes and templates as a table
pub fn display_analysis_summary(results: &AnalysisResults) {
    /// Row for the cluster summary table.
    #[derive(Tabled)]
    struct ClusterRow {
        cluster: usize,
        members: usize,
        medoid: String,
        template: String,
    }

    let rows: Vec<ClusterRow> = results
        .clusters
        .iter()
        .map(|cluster| ClusterRow {
            cluster: cluster.cluster_id,
            members: cluster.member_ids.len(),
            medoid: cluster.medoid_id.clone(),
            template: results
                .template_for(cluster.cluster_id)
                .map(|template| truncate(&template.render(), 60))
                .unwrap_or_default(),
        })
        .collect();

    println!("{}", "Cluster Summary".bright_blue().bold());
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    let stats = &results.statistics;
    println!(
        "   {} samples, {} clusters, {} mined templates, {} iterations{}",
        stats.sample_count,
        stats.cluster_count,
        stats.mined_templates,
        stats.iterations,
        if stats.converged {
            String::new()
        } else {
            format!(" {}", "(not converged)".yellow())
        }
    );
    println!();
}

/// Display configuration summary in a formatted table
pub fn display_config_summary(config: &CodealignConfig) {
    /// Row for configuration display table.
    #[derive(Tabled)]
    struct ConfigRow {
        setting: String,
        value: String,
    }

    let config_rows = vec![
        ConfigRow {
            setting: "Language".to_string(),
            value: config.normalization.language.as_str().to_string(),
        },
        ConfigRow {
            setting: "Clusters (k)".to_string(),
            value: config.clustering.k.to_string(),
        },
        ConfigRow {
            setting: "Max Iterations".to_string(),
            value: config.clustering.max_iterations.to_string(),
        },
        ConfigRow {
            setting: "Min Substring Length".to_string(),
            value: config.templates.min_substring_length.to_string(),
        },
        ConfigRow {
            setting: "Template Parts".to_string(),
            value: config.templates.max_parts.to_string(),
        },
        ConfigRow {
            setting: "Include Patterns".to_string(),
            value: config.ingest.include_patterns.join(", "),
        },
    ];

    let mut table = Table::new(config_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!();
}

/// Render the report and write it to `out`, or stdout when absent
pub async fn write_report(
    results: &AnalysisResults,
    format: ReportFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let report = render_report(results, format)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, report).await?;
            println!(
                "{} {}",
                "Report saved to:".bright_green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => print!("{report}"),
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
