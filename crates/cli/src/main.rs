//! Scenariogen CLI - Main Entry Point
//!
//! Generates the fixed BDD login scenarios from a requirement, validates
//! scenario text against the known action keywords, and serves the sample
//! app for manual browser checks.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{generate, serve, validate};

/// Scenariogen CLI - rule-based BDD scenarios
#[derive(Parser)]
#[command(name = "scenariogen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "plain", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scenarios from a requirement
    Generate(generate::GenerateArgs),

    /// Validate scenario text against the known actions
    Validate(validate::ValidateArgs),

    /// Serve the sample app on an ephemeral port
    Serve(serve::ServeArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => generate::execute(args, cli.format)?,
        Commands::Validate(args) => {
            if !validate::execute(args, cli.format)? {
                std::process::exit(1);
            }
        }
        Commands::Serve(args) => serve::execute(args).await?,
        Commands::Version => {
            println!("scenariogen v{}", scenariogen_common::VERSION);
            println!("Rule-based BDD scenario generator");
        }
    }

    Ok(())
}
