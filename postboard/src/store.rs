//! Post repository: the only interface callers use to read and write posts.

use std::sync::{Mutex, MutexGuard};

use crate::db::{Database, PostQueries};
use crate::error::{BlogError, BlogResult, ValidationError};
use crate::models::Post;

/// Storage operations for posts.
pub trait PostStore: Send + Sync {
    /// Persist a new post. Fails if the title is blank.
    fn add(&self, title: &str, text: &str) -> BlogResult<Post>;

    /// All posts, newest first.
    fn list(&self) -> BlogResult<Vec<Post>>;

    /// Look up a post by id.
    fn get(&self, id: i64) -> BlogResult<Option<Post>>;

    /// Remove a post. Returns `false` if no post had that id.
    fn delete(&self, id: i64) -> BlogResult<bool>;
}

/// Reject titles that are empty once surrounding whitespace is removed.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// `SQLite`-backed post store. The mutex serializes every statement.
pub struct SqlitePostStore {
    db: Mutex<Database>,
}

impl SqlitePostStore {
    pub const fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    fn lock(&self) -> BlogResult<MutexGuard<'_, Database>> {
        self.db.lock().map_err(|_| BlogError::Poisoned)
    }
}

impl PostStore for SqlitePostStore {
    fn add(&self, title: &str, text: &str) -> BlogResult<Post> {
        validate_title(title)?;

        let db = self.lock()?;
        let id = PostQueries::insert(db.conn(), title, text)?;
        Ok(Post::new(id, title, text))
    }

    fn list(&self) -> BlogResult<Vec<Post>> {
        let db = self.lock()?;
        Ok(PostQueries::list(db.conn())?)
    }

    fn get(&self, id: i64) -> BlogResult<Option<Post>> {
        let db = self.lock()?;
        Ok(PostQueries::get_by_id(db.conn(), id)?)
    }

    fn delete(&self, id: i64) -> BlogResult<bool> {
        let db = self.lock()?;
        Ok(PostQueries::delete(db.conn(), id)? > 0)
    }
}
