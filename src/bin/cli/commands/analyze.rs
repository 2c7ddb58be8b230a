//! Analyze command: ingestion, pipeline run, and reporting.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::args::AnalyzeArgs;
use crate::cli::config_layer::build_layered_config;
use crate::cli::output::{display_analysis_summary, write_report};
use codealign_rs::core::config::IngestConfig;
use codealign_rs::io::samples::{load_samples_from_dir, parse_manifest};
use codealign_rs::{CodealignEngine, SourceSample};

/// Run the full pipeline over the samples at `args.input`
pub async fn analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let working_dir = std::env::current_dir()?;
    let config = build_layered_config(&args, &working_dir)?;

    let samples = load_input(&args.input, &config.ingest).await?;
    if samples.is_empty() {
        return Err(anyhow::anyhow!(
            "No samples found in {}",
            args.input.display()
        ));
    }
    info!("Analyzing {} samples", samples.len());

    let engine = CodealignEngine::new(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed}")?);
    spinner.set_message(format!("Aligning {} samples", samples.len()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let results = tokio::task::spawn_blocking(move || engine.analyze(samples)).await??;
    spinner.finish_and_clear();

    if args.out.is_some() {
        display_analysis_summary(&results);
    } else if !results.statistics.converged {
        eprintln!(
            "{}",
            "Clustering stopped at the iteration cap before converging".yellow()
        );
    }

    write_report(&results, args.format.into(), args.out.as_deref()).await
}

/// Directory input is walked; any other path is read as a JSON manifest.
async fn load_input(input: &Path, ingest: &IngestConfig) -> anyhow::Result<Vec<SourceSample>> {
    let metadata = tokio::fs::metadata(input)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot read input {}: {}", input.display(), e))?;

    if metadata.is_dir() {
        let root = input.to_path_buf();
        let ingest = ingest.clone();
        let samples =
            tokio::task::spawn_blocking(move || load_samples_from_dir(&root, &ingest)).await??;
        Ok(samples)
    } else {
        let content = tokio::fs::read_to_string(input).await?;
        Ok(parse_manifest(&content)?)
    }
}
