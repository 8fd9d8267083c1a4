use std::sync::Arc;

use anyhow::{Context, Result};
use bmm_client::config::loader;
use bmm_client::observability::metrics::ClientMetrics;
use bmm_client::utils::logging::{self, LogLevel};
use bmm_client::{BmmClient, Id, Logger};
use bmm_client::config::validator;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "bmm.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// static token used instead of the client-credentials grant
    #[arg(long, env = "BMM_DEBUG_TOKEN", hide_env_values = true)]
    debug_token: Option<String>,
    /// print collected metrics to stderr on exit
    #[arg(long)]
    metrics: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// years with published-album counts
    Years,
    /// albums published in a year
    Albums { year: u32 },
    /// an album with its tracks
    Tracks { album_id: String },
    /// podcast tracks for a tag, unpublished included
    Podcast {
        tag: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// overview entries with supported languages
    Languages,
    /// global game statistics
    Status,
    /// obtain an access token and print it
    Token,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let mut config = loader::read_config(&args.config)?;
    if let Some(token) = args.debug_token.to_owned() {
        config.auth.debug_token = Some(token);
    }
    validator::validate_client_config(&config)?;

    // -------------------------------
    // 2. Build logger, metrics and client
    // -------------------------------

    let logging_config = logging::resolve(&config.logging, args.log_level);
    let logger = Logger::new(logging::build_dispatch(&logging_config));
    let metrics = Arc::new(ClientMetrics::new());
    let client = BmmClient::from_config(&config, logger.clone(), metrics.clone())?;

    tracing::dispatcher::with_default(logger.dispatch(), || {
        info!(base_url = %config.api.base_url, "client ready");
    });

    // -------------------------------
    // 3. Run command
    // -------------------------------

    let result = run(&client, args.command).await;

    if args.metrics {
        eprintln!("{}", metrics.gather_text());
    }
    result
}

async fn run(client: &BmmClient, command: Command) -> Result<()> {
    match command {
        Command::Years => print(&client.get_years().await?),
        Command::Albums { year } => print(&client.get_albums(year).await?),
        Command::Tracks { album_id } => {
            let album_id = Id::parse(&album_id)?;
            print(&client.get_album_tracks(album_id).await?)
        }
        Command::Podcast { tag, limit } => print(&client.get_podcast_tracks(&tag, limit).await?),
        Command::Languages => print(&client.get_languages().await?),
        Command::Status => print(&client.get_game_statistics().await?),
        Command::Token => {
            let token = client.dispatcher().tokens().get_access_token().await?;
            println!("{}", token);
            Ok(())
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{}", rendered);
    Ok(())
}
