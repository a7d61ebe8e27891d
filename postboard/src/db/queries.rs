//! Database query implementations.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Post;

/// Queries for posts table.
pub struct PostQueries;

impl PostQueries {
    /// Insert a new post (id is auto-generated).
    pub fn insert(conn: &Connection, title: &str, text: &str) -> Result<i64> {
        conn.execute(
            "INSERT INTO posts (title, text) VALUES (?1, ?2)",
            params![title, text],
        )
        .context("Failed to insert post")?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a post by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Post>> {
        conn.query_row(
            "SELECT id, title, text FROM posts WHERE id = ?1",
            params![id],
            Self::row_to_post,
        )
        .optional()
        .with_context(|| format!("Failed to load post {id}"))
    }

    /// List all posts, newest first.
    pub fn list(conn: &Connection) -> Result<Vec<Post>> {
        let mut stmt = conn.prepare("SELECT id, title, text FROM posts ORDER BY id DESC")?;
        let rows = stmt.query_map([], Self::row_to_post)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    /// Find posts with exactly this title, newest first.
    pub fn find_by_title(conn: &Connection, title: &str) -> Result<Vec<Post>> {
        let mut stmt =
            conn.prepare("SELECT id, title, text FROM posts WHERE title = ?1 ORDER BY id DESC")?;
        let rows = stmt.query_map(params![title], Self::row_to_post)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    /// Delete a post. Returns the number of rows removed.
    pub fn delete(conn: &Connection, id: i64) -> Result<usize> {
        let count = conn
            .execute("DELETE FROM posts WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete post {id}"))?;
        Ok(count)
    }

    /// Count stored posts.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a row to a Post.
    fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
        Ok(Post {
            id: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
        })
    }
}
