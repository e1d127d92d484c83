//! CLI binary entry point for relational-model-cli

use anyhow::Result;
use clap::{Parser, Subcommand};
use relational_model_sdk::cli::commands::validate::{ValidateArgs, handle_validate};
use relational_model_sdk::cli::output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relational-model-cli")]
#[command(about = "Validate relational models against SQL Server rules")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a YAML or JSON model document
    Validate {
        /// Model document (.yaml, .yml or .json)
        model: PathBuf,
        /// Validator configuration (.toml, .yaml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            model,
            config,
            format,
        } => handle_validate(&ValidateArgs {
            model,
            config,
            format,
        })?,
    }
    Ok(())
}
