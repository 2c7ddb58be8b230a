//! Configuration management commands.
//!
//! Initialization, validation, and printing defaults.

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::cli::args::{InitConfigArgs, ValidateConfigArgs};
use crate::cli::config_layer::load_configuration;
use crate::cli::output::display_config_summary;
use codealign_rs::core::config::CodealignConfig;

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("# Default codealign configuration");
    println!("# Save this to a file and customize as needed");
    println!("# Usage: codealign analyze --config your-config.yml <input>");
    println!();

    let config = CodealignConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub async fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Configuration file already exists: {}. Use --force to overwrite or choose a different name with --output",
            args.output.display()
        ));
    }

    let config = CodealignConfig::default();
    let yaml_content = serde_yaml::to_string(&config)?;
    tokio::fs::write(&args.output, yaml_content).await?;

    println!(
        "{} {}",
        "Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "Key settings you can customize:".bright_blue().bold());

    /// Row type for the configuration tips table.
    #[derive(Tabled)]
    struct CustomizationRow {
        setting: String,
        description: String,
    }

    let customization_rows = vec![
        CustomizationRow {
            setting: "clustering.k".to_string(),
            description: "Number of clusters (default: 3)".to_string(),
        },
        CustomizationRow {
            setting: "templates.min_substring_length".to_string(),
            description: "Shortest shared substring kept in a template (default: 10)".to_string(),
        },
        CustomizationRow {
            setting: "templates.fallback".to_string(),
            description: "first_member or absent when nothing is shared".to_string(),
        },
        CustomizationRow {
            setting: "normalization.extract_class".to_string(),
            description: "Only compare one class of every sample".to_string(),
        },
        CustomizationRow {
            setting: "alignment.max_sequence_length".to_string(),
            description: "Truncate long samples before alignment".to_string(),
        },
    ];

    let mut table = Table::new(customization_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    Ok(())
}

/// Validate a codealign configuration file
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let loaded = load_configuration(Some(&args.config)).and_then(|config| {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .map(|()| config)
    });

    let config = match loaded {
        Ok(config) => {
            println!("{}", "Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {}", "Configuration validation failed:".red(), e);
            eprintln!();
            eprintln!(
                "{}",
                "Tip: Use 'codealign print-default-config' to see valid format".dimmed()
            );
            return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
        }
    };

    display_config_summary(&config);
    Ok(())
}
