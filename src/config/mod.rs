pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "small-fx")]
#[command(about = "Filter, flatten and index JSON records with a TOML-defined pipeline")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "fx-config.toml")]
    pub config: String,

    /// Override the input file from config
    #[arg(long)]
    pub input: Option<String>,

    /// Override the output file from config
    #[arg(long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Dry run - show the pipeline without reading or writing records
    #[arg(long)]
    pub dry_run: bool,
}
