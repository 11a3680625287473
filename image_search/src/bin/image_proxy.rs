use std::sync::Arc;

use clap::{Parser, Subcommand};
use database::{DatabaseConfig, GameStore, RetryPolicy, SqliteStore};
use image_search::{run_backfill, serve, ProxyConfig, SearchError, WikimediaSource};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
struct Params {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve POST /search-images
    Serve,
    /// Fill in images for one batch of events that have none
    Backfill {
        #[arg(long)]
        database: Option<String>,
    },
    /// Print the most recent backfill attempts
    Logs {
        #[arg(long)]
        database: Option<String>,
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), SearchError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Params::parse();
    info!("args: {args:?}");

    let config = ProxyConfig::load()?;
    match args.command {
        Command::Serve => {
            let source = Arc::new(WikimediaSource::new(&config));
            serve(&config, source).await
        }
        Command::Backfill { database } => {
            let store = open_store(database).await?;
            let source = Arc::new(WikimediaSource::new(&config));
            let report = run_backfill(&store, source, RetryPolicy::default()).await?;
            println!("{report}");
            Ok(())
        }
        Command::Logs { database, limit } => {
            let store = open_store(database).await?;
            for log in store.recent_scraper_logs(limit).await? {
                let event = log
                    .event_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} [{}] {event}: {}",
                    log.created_at.format("%Y-%m-%d %H:%M:%S"),
                    log.status,
                    log.message
                );
            }
            Ok(())
        }
    }
}

async fn open_store(database: Option<String>) -> Result<SqliteStore, SearchError> {
    let db_config = DatabaseConfig::from_cli_or_env_or_yaml(database, None);
    info!("Using database at {}", db_config.url);
    let pool = db_config.create_pool().await?;
    Ok(SqliteStore::connect(pool).await?)
}
