//! Command-line interface for strictly_sticks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Sticks - stick-removal game server and terminal client
#[derive(Parser, Debug)]
#[command(name = "strictly_sticks")]
#[command(about = "Stick-removal game against a simple computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to the server config file
        #[arg(short, long, default_value = "strictly_sticks.toml")]
        config: PathBuf,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Row lengths for new games, e.g. 1,2,3,4 (overrides config)
        #[arg(long, value_delimiter = ',')]
        rows: Option<Vec<usize>>,
    },

    /// Play in the terminal against a running server
    Play {
        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server_url: String,

        /// Session ID (auto-generates if not provided)
        #[arg(long)]
        session: Option<String>,
    },

    /// Play in the terminal without a server
    Local {
        /// Path to a config file supplying rows and win condition
        #[arg(short, long, default_value = "strictly_sticks.toml")]
        config: PathBuf,

        /// Row lengths, e.g. 1,2,3,4 (overrides config)
        #[arg(long, value_delimiter = ',')]
        rows: Option<Vec<usize>>,
    },
}
