//! Terminal Algo - Development Tools

use std::path::PathBuf;

use algo_tools::inspect::{export_presets, RegionDump};
use algo_tools::validate::{validate, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "algo-tools")]
#[command(about = "Development tools for the Terminal algo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Ron,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a strategy policy, optionally against a match configuration
    Validate {
        /// Preset name or path to a RON policy file
        #[arg(long, default_value = "balanced")]
        policy: String,
        /// Path to a match configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the region library
    Regions {
        /// Arena half-size
        #[arg(long, default_value_t = 14)]
        half: i32,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write the built-in presets as RON files
    Presets {
        /// Output directory
        #[arg(default_value = "presets")]
        out: PathBuf,
    },
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Validate { policy, config } => {
            tracing::info!("Validating policy: {policy}");
            let report = validate(config.as_deref(), &policy)?;
            match report.units {
                Some(units) => tracing::info!(
                    "Validation passed: {} with {units} unit types",
                    report.policy
                ),
                None => tracing::info!("Validation passed: {}", report.policy),
            }
        }
        Commands::Regions { half, format } => {
            let dump = RegionDump::build(half);
            let out = match format {
                Format::Text => dump.to_text(),
                Format::Ron => dump.to_ron()?,
            };
            println!("{out}");
        }
        Commands::Presets { out } => {
            let written = export_presets(&out)?;
            tracing::info!("Wrote {} presets to {}", written.len(), out.display());
        }
    }
    Ok(())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
