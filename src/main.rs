//! Strictly Sticks - Unified CLI
//!
//! Game server and terminal client in one binary.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use strictly_sticks::cli::{Cli, Command};
use strictly_sticks::{LocalTable, RestGameClient, ServerConfig, server, terminal};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            rows,
        } => run_server(&config, host, port, rows).await,
        Command::Play {
            server_url,
            session,
        } => run_play(server_url, session).await,
        Command::Local { config, rows } => run_local(&config, rows).await,
    }
}

/// Run the HTTP game server
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_server(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
    rows: Option<Vec<usize>>,
) -> Result<()> {
    initialize_tracing("info,strictly_sticks=debug");

    let config = ServerConfig::load_or_default(config_path)?.with_overrides(host, port, rows)?;
    info!(?config, "Starting Strictly Sticks HTTP server");

    server::serve(config).await
}

/// Run the terminal client against a server
#[instrument]
async fn run_play(server_url: String, session: Option<String>) -> Result<()> {
    initialize_tracing("warn");

    let session_id = session.unwrap_or_else(|| format!("player_{}", std::process::id()));
    info!(url = %server_url, session_id = %session_id, "Connecting to server");

    let mut client = RestGameClient::new(server_url, session_id);
    terminal::run(&mut client).await
}

/// Run the terminal client with an in-process game
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_local(config_path: &Path, rows: Option<Vec<usize>>) -> Result<()> {
    initialize_tracing("warn");

    let config = ServerConfig::load_or_default(config_path)?.with_overrides(None, None, rows)?;
    let mut table = LocalTable::new(config.rows().clone(), *config.win_condition());
    terminal::run(&mut table).await
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` when set.
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}
