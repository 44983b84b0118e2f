//! vox2json - MagicaVoxel .vox to JSON converter

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vox_export::{convert_to_json, ExportConfig, ModelSummary};
use vox_format::Decoder;

#[derive(Parser)]
#[command(name = "vox2json")]
#[command(about = "MagicaVoxel .vox to JSON converter")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a .vox file to JSON
    Convert {
        /// Input .vox file
        input: PathBuf,

        /// Output .json file (default: input with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print a summary of a .vox file
    Info {
        /// Input .vox file
        input: PathBuf,

        /// Export configuration (TOML), for its [decode] options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<ExportConfig> {
    match path {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => Ok(ExportConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            compact,
        } => {
            let mut config = load_config(config.as_deref())?;
            if compact {
                config = config.compact();
            }
            let output = output.unwrap_or_else(|| input.with_extension("json"));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            convert_to_json(&input, &output, &config)
                .with_context(|| format!("failed to convert {}", input.display()))?;
            tracing::info!("Done!");
        }

        Commands::Info { input, config } => {
            let config = load_config(config.as_deref())?;
            let model = Decoder::with_options(config.decode)
                .decode_file(&input)
                .with_context(|| format!("failed to decode {}", input.display()))?;
            println!("file: {}", input.display());
            println!("{}", ModelSummary::new(&model));
        }
    }

    Ok(())
}
