//! CLI Argument Structures
//!
//! Argument definitions and command structures used by the codealign binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use codealign_rs::io::reports::ReportFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Alignment-based code similarity clustering
#[derive(Parser)]
#[command(name = "codealign")]
#[command(version = VERSION)]
#[command(about = "Codealign - cluster similar code and extract shared templates")]
#[command(long_about = "
Normalize a set of source samples, align every pair, cluster them with
k-medoids, and synthesize a template of shared substrings per cluster.

Common Usage:

  # Cluster every Python file under ./implementations into 3 groups
  codealign analyze ./implementations

  # Only compare the Scanner class, write a text report
  codealign analyze ./implementations --extract-class Scanner --format text --out templates.txt

  # Read samples from a JSON manifest of {\"id\", \"text\"} objects
  codealign analyze samples.json -k 5 --format yaml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster samples and build templates
    Analyze(Box<AnalyzeArgs>),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a codealign configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Directory of sources, or a JSON manifest file
    pub input: PathBuf,

    /// Configuration file (defaults to .codealign.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of clusters
    #[arg(short)]
    pub k: Option<usize>,

    /// Minimum length of a template part
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Include glob for directory input (repeatable, replaces configured patterns)
    #[arg(long = "pattern")]
    pub patterns: Vec<String>,

    /// Only analyze this class from each sample
    #[arg(long)]
    pub extract_class: Option<String>,

    /// Worker threads for alignment
    #[arg(long)]
    pub threads: Option<usize>,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".codealign.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON format output
    Json,
    /// YAML format output
    Yaml,
    /// Templates, assignment table, and normalized samples
    Text,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Text => ReportFormat::Text,
        }
    }
}
