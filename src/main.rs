use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dreamcatcher::address::DreamAddress;
use dreamcatcher::retriever::{RetrieverBuilder, Summary};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Batch dream downloader
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Server IP or hostname
    #[arg(long)]
    host: String,

    /// Server port
    #[arg(long)]
    port: u16,

    /// Destination directory for downloaded dreams
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Request timeout in seconds (default: transport defaults)
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download by dream ID
    Id {
        /// Numeric dream ID or DA-formatted address
        id: String,
    },
    /// Download a batch of dream IDs from a file
    #[command(name = "id_batch")]
    IdBatch {
        /// File with one dream address per line
        file: PathBuf,
    },
    /// Download by island name
    #[command(name = "land_name")]
    LandName {
        /// Name of the island
        land_name: String,
    },
    /// Download all recommended dreams
    Recommend {
        /// Language code (e.g. en-GB, ja)
        lang: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut builder =
        RetrieverBuilder::for_server(&cli.host, cli.port).directory(cli.output.clone());
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let retriever = builder.build()?;

    let summaries: Vec<Summary> = match cli.command {
        Command::Id { id } => {
            let address: DreamAddress = id.parse()?;
            vec![retriever.download_by_id(address.id()).await]
        }
        Command::IdBatch { file } => {
            let contents = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("could not read address file {}", file.display()))?;
            let lines: Vec<String> = contents.lines().map(str::to_string).collect();
            retriever.download_batch(&lines).await
        }
        Command::LandName { land_name } => {
            vec![retriever.download_by_land_name(&land_name).await]
        }
        Command::Recommend { lang } => retriever.download_recommended(&lang).await,
    };

    let saved = summaries.iter().filter(|s| s.is_saved()).count();
    info!("{saved}/{} dreams saved", summaries.len());

    Ok(())
}
