//! Upright CLI — normalize JPEG orientation of local files.
//!
//! Configuration is read from the environment (UPRIGHT_*), optionally via a .env file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use upright_cli::{default_output_path, init_tracing, mime_from_path};
use upright_core::PreprocessorConfig;
use upright_processing::{FilePreprocessor, ImagePreprocessor, MediaFile, MetadataReader};

#[derive(Parser)]
#[command(name = "upright", about = "Rotate JPEG images to their upright orientation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a file and write the result
    Normalize {
        /// Path to the input file
        input: PathBuf,
        /// Output path (default: <stem>.upright.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Declared MIME type (default: guessed from the extension)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Print orientation and frame dimensions as JSON
    Inspect {
        /// Path to the input file
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = PreprocessorConfig::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Normalize {
            input,
            output,
            mime,
        } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mime = mime.unwrap_or_else(|| mime_from_path(&input).to_string());
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut file = MediaFile::new(name, mime, data.clone());
            ImagePreprocessor::new(&config).accept(&mut file);

            let output = output.unwrap_or_else(|| default_output_path(&input));
            std::fs::write(&output, &file.data)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            let status = if file.data == data {
                "unchanged"
            } else {
                "normalized"
            };
            println!("{} -> {} ({})", input.display(), output.display(), status);
        }
        Commands::Inspect { input } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let info = MetadataReader::read(&data)
                .with_context(|| format!("Failed to read metadata of {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
