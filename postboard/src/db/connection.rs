//! Database connection management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;

const DATA_DIR: &str = "postboard";
const DB_FILE: &str = "postboard.db";

/// Database wrapper for postboard.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get the default database path.
    /// Uses the platform data directory, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir().map_or_else(
            || PathBuf::from(DB_FILE),
            |dir| dir.join(DATA_DIR).join(DB_FILE),
        )
    }

    /// Open or create the database at a specific path.
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;

        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Open a private in-memory database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                text TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_posts_title ON posts(title);
            ",
            )
            .context("Failed to initialize schema")?;
        Ok(())
    }

    /// Get a reference to the connection.
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }
}
