use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reviewharvest_common::Config;
use reviewharvest_scout::{Lemon8Harvester, MsStoreHarvester};
use reviewharvest_sink::sink_from_config;

#[derive(Parser)]
#[command(name = "reviewharvest", about = "Review harvesting pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Harvest a Lemon8 user: posts, comments, comment details.
    Lemon8 {
        #[arg(long, default_value = "7138599741986915329")]
        user_id: String,
    },
    /// Harvest one Microsoft Store media type.
    Msstore {
        #[arg(long, default_value = "games")]
        media_type: String,
    },
    /// Harvest all Microsoft Store media types (games, then apps).
    MsstoreAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("reviewharvest_scout=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    config.log_redacted();

    let sink = sink_from_config(&config)?;
    info!(sink = sink.name(), "Review harvest starting...");

    let stats = match cli.command {
        Command::Lemon8 { user_id } => {
            Lemon8Harvester::new(sink)?.by_user_id(&user_id).await?
        }
        Command::Msstore { media_type } => {
            MsStoreHarvester::new(sink).by_media_type(&media_type).await?
        }
        Command::MsstoreAll => MsStoreHarvester::new(sink).all().await?,
    };

    info!("{stats}");
    Ok(())
}
