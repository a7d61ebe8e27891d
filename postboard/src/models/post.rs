//! Post model representing a single blog entry.

use serde::{Deserialize, Serialize};

/// A blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier assigned by the database on insert.
    pub id: i64,
    /// Title of the entry. Never empty.
    pub title: String,
    /// Body text.
    pub text: String,
}

impl Post {
    /// Create a post from stored values.
    pub fn new(id: i64, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
        }
    }
}
