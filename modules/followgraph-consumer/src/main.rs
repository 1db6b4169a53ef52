use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use followgraph_common::{Config, Lifecycle};
use followgraph_consumer::{Orchestrator, Outcome};
use followgraph_graph::{GraphClient, GraphWriter};
use followgraph_registry::UserRegistry;
use twitter_client::TwitterClient;

/// Replay newline-delimited post events through the consumer.
///
/// Broker transport lives outside this binary; whatever drains the queue
/// writes the raw payloads to a file (or pipes them in) and this replays
/// them one at a time.
#[derive(Parser)]
#[command(name = "consumer")]
struct Args {
    /// Path to newline-delimited post event payloads, or "-" for stdin.
    #[arg(long)]
    events: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("followgraph=info".parse()?))
        .init();

    info!("Follow graph consumer starting...");

    let args = Args::parse();
    let config = Config::from_env();
    config.log_redacted();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let registry = UserRegistry::new(pool);
    registry.migrate().await?;

    let client = GraphClient::connect(
        &config.neo4j_uri,
        &config.neo4j_user,
        &config.neo4j_password,
    )
    .await?;

    let lifecycle = Lifecycle::new();
    let writer = GraphWriter::new(client, lifecycle.clone());

    let mut twitter = TwitterClient::new(config.twitter_bearer_token.clone());
    if let Some(base) = &config.twitter_api_base {
        twitter = twitter.with_base_url(base.clone());
    }

    let orchestrator = Orchestrator::new(
        Arc::new(registry),
        Arc::new(writer),
        Arc::new(twitter),
        lifecycle.clone(),
    );

    // Ctrl-C flips the lifecycle; every in-flight wait unwinds cleanly.
    {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
                lifecycle.close();
            }
        });
    }

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = if args.events == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        Box::new(BufReader::new(tokio::fs::File::open(&args.events).await?))
    };
    let mut lines = reader.lines();

    let (mut registered, mut duplicates, mut failed) = (0u64, 0u64, 0u64);
    while let Some(line) = lines.next_line().await? {
        if lifecycle.is_closed() {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match orchestrator.process(line.as_bytes()).await {
            Outcome::Registered { .. } => registered += 1,
            Outcome::Duplicate => duplicates += 1,
            Outcome::Failed => failed += 1,
            Outcome::Interrupted => break,
        }
    }

    info!(registered, duplicates, failed, "Replay complete");
    Ok(())
}
