//! CLI command execution.
//!
//! `serve` runs the web server; the other commands read the database
//! directly and never mutate posts.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use chrono::Duration;

use crate::db::{Database, PostQueries};
use crate::models::Post;
use crate::search::search;
use crate::server::{self, ServerConfig};
use crate::session::Credentials;
use crate::store::{PostStore, SqlitePostStore};

use super::args::{Cli, Commands};

/// Execute a CLI command.
pub async fn execute(cli: Cli) -> Result<()> {
    let database = cli.database.unwrap_or_else(Database::default_path);

    match cli.command {
        Commands::Serve {
            host,
            port,
            username,
            password,
            session_ttl_minutes,
            static_dir,
            open,
        } => {
            let config = ServerConfig {
                addr: SocketAddr::new(host, port),
                database,
                credentials: Credentials::new(username, password),
                session_ttl: Duration::minutes(i64::from(session_ttl_minutes)),
                static_dir,
                open_browser: open,
            };
            server::start_server(config).await
        }
        Commands::InitDb => init_db(&database),
        Commands::List { title } => list_posts(&database, title.as_deref()),
        Commands::Search { query } => search_posts(&database, &query),
    }
}

fn init_db(path: &Path) -> Result<()> {
    let db = Database::open_at(path)?;
    let count = PostQueries::count(db.conn())?;
    println!("Database ready at {} ({count} posts)", path.display());
    Ok(())
}

fn list_posts(path: &Path, title: Option<&str>) -> Result<()> {
    let db = Database::open_at(path)?;
    let posts = match title {
        Some(title) => PostQueries::find_by_title(db.conn(), title)?,
        None => PostQueries::list(db.conn())?,
    };
    print_posts(&posts);
    Ok(())
}

fn search_posts(path: &Path, query: &str) -> Result<()> {
    let store = SqlitePostStore::new(Database::open_at(path)?);
    let posts = search(query, &store.list()?);
    print_posts(&posts);
    Ok(())
}

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts found.");
        return;
    }

    println!("{:<6} {:<32} {}", "ID", "TITLE", "TEXT");
    println!("{}", "-".repeat(72));

    for post in posts {
        let text = post.text.lines().next().unwrap_or("");
        println!(
            "{:<6} {:<32} {}",
            post.id,
            truncate(&post.title, 30),
            truncate(text, 32)
        );
    }
}

/// Shorten to at most `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut short: String = s.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
