//! Postboard - a small blog: one author account, posts, and title search.
//!
//! Architecture:
//! - `store` persists posts in `SQLite` behind the `PostStore` trait
//! - `session` holds per-client login state and the credential guard
//! - `blog` composes store, guard and search into request-level operations
//! - `server` maps those operations onto HTTP routes and HTML pages

mod blog;
mod cli;
mod db;
mod error;
mod logging;
mod models;
mod search;
mod server;
mod session;
mod store;

use anyhow::Result;
use clap::Parser;

use cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.log_json)?;
    execute(cli).await
}
