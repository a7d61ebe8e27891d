//! CLI argument definitions.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

/// Postboard - a small blog with a single author account
#[derive(Parser, Debug)]
#[command(name = "postboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the `SQLite` database (defaults to the platform data directory)
    #[arg(long, global = true, env = "POSTBOARD_DATABASE")]
    pub database: Option<PathBuf>,

    /// Base log level (trace|debug|info|warn|error); RUST_LOG overrides it
    #[arg(long, global = true, env = "POSTBOARD_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "POSTBOARD_LOG_JSON")]
    pub log_json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server
    Serve {
        /// Address to bind
        #[arg(long, env = "POSTBOARD_HOST", default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, env = "POSTBOARD_PORT", default_value = "5000")]
        port: u16,

        /// Username of the author account
        #[arg(long, env = "POSTBOARD_USERNAME", default_value = "admin")]
        username: String,

        /// Password of the author account
        #[arg(
            long,
            env = "POSTBOARD_PASSWORD",
            default_value = "admin",
            hide_env_values = true,
            hide_default_value = true
        )]
        password: String,

        /// Idle minutes before a session expires
        #[arg(long, env = "POSTBOARD_SESSION_TTL_MINUTES", default_value = "120")]
        session_ttl_minutes: u32,

        /// Directory served under /static
        #[arg(long, env = "POSTBOARD_STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,

        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },

    /// Create the database and schema if missing
    InitDb,

    /// List stored posts, newest first
    List {
        /// Only posts with exactly this title
        #[arg(long)]
        title: Option<String>,
    },

    /// Show posts whose title contains QUERY (case-sensitive)
    Search {
        /// Substring to look for
        query: String,
    },
}
