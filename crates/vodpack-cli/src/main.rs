//! Vodpack CLI — convert a local video into an HLS package and publish
//! it, or fetch a source file from a Drive share link.
//!
//! Configuration comes from the environment (see vodpack-core). Errors
//! print to stderr and exit non-zero.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use vodpack_cli::init_tracing;
use vodpack_core::Config;
use vodpack_storage::create_storage;
use vodpack_transcode::{extract_file_id, read_share_link, run_conversion, Fetcher};

#[derive(Parser)]
#[command(name = "vodpack", about = "HLS packaging and publishing pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the single video in a directory to HLS and upload it
    Convert {
        /// Directory containing the source file (defaults to the current directory)
        source_dir: Option<PathBuf>,
    },
    /// Download the source file referenced by the local share-link file
    Fetch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Convert { source_dir } => {
            let source_dir = match source_dir {
                Some(dir) => dir,
                None => env::current_dir().context("Failed to determine current directory")?,
            };

            config.validate()?;
            let storage = create_storage(&config).await?;
            run_conversion(&config, storage, &source_dir).await?;
        }
        Commands::Fetch => {
            let link_file = PathBuf::from(&config.link_file);
            let link = read_share_link(&link_file)?;
            tracing::info!(link = %link, "Read share link");

            let file_id = extract_file_id(&link)?;
            let dest_dir =
                env::current_dir().context("Failed to determine current directory")?;

            let fetcher = Fetcher::new();
            let path = fetcher.download(&file_id, &dest_dir).await?;
            tracing::info!(path = %path.display(), "File downloaded");
        }
    }

    Ok(())
}
