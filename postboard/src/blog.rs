//! Blog operations: the request-level behaviour shared by the HTTP layer and
//! the CLI.
//!
//! `Blog` owns the injected store and the auth guard. Every call that depends
//! on who is asking takes the caller's `Session` explicitly.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{BlogError, BlogResult};
use crate::models::{Post, Session};
use crate::search::search;
use crate::session::AuthGuard;
use crate::store::PostStore;

/// Posts plus the viewer's auth state, for rendering the front page.
#[derive(Debug, Clone)]
pub struct IndexView {
    pub posts: Vec<Post>,
    pub authenticated: bool,
}

/// Result of an authorized delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A post was removed.
    Deleted,
    /// No post had that id; nothing changed.
    Missing,
}

/// Blog service composing the post store, auth guard and search.
#[derive(Clone)]
pub struct Blog {
    store: Arc<dyn PostStore>,
    guard: AuthGuard,
}

impl Blog {
    pub fn new(store: Arc<dyn PostStore>, guard: AuthGuard) -> Self {
        Self { store, guard }
    }

    /// All posts and whether `session` is logged in.
    pub fn index(&self, session: &Session) -> BlogResult<IndexView> {
        Ok(IndexView {
            posts: self.store.list()?,
            authenticated: session.is_authenticated(),
        })
    }

    /// Create a post. Requires login; the title must not be blank.
    pub fn add(&self, session: &Session, title: &str, text: &str) -> BlogResult<Post> {
        self.guard.require_auth(session)?;
        let post = self.store.add(title, text)?;
        info!(post_id = post.id, title = %post.title, "post created");
        Ok(post)
    }

    /// Delete a post. Requires login; deleting a missing id is not an error.
    pub fn delete(&self, session: &Session, id: i64) -> BlogResult<DeleteOutcome> {
        self.guard.require_auth(session)?;
        if self.store.delete(id)? {
            info!(post_id = id, "post deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            debug!(post_id = id, "delete of missing post");
            Ok(DeleteOutcome::Missing)
        }
    }

    /// Posts whose title contains `query`.
    pub fn search(&self, query: &str) -> BlogResult<Vec<Post>> {
        let posts = self.store.list()?;
        Ok(search(query, &posts))
    }

    /// A single post, or `NotFound`.
    pub fn get(&self, id: i64) -> BlogResult<Post> {
        self.store.get(id)?.ok_or(BlogError::NotFound(id))
    }

    pub fn login(&self, session: &mut Session, username: &str, password: &str) -> BlogResult<()> {
        self.guard.login(session, username, password)
    }

    pub fn logout(&self, session: &mut Session) {
        self.guard.logout(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::error::ValidationError;
    use crate::session::Credentials;
    use crate::store::SqlitePostStore;
    use chrono::Duration;

    fn test_blog() -> Blog {
        let store = SqlitePostStore::new(Database::open_in_memory().unwrap());
        Blog::new(
            Arc::new(store),
            AuthGuard::new(Credentials::new("admin", "admin")),
        )
    }

    fn logged_in(blog: &Blog) -> Session {
        let mut session = Session::new(Duration::minutes(10));
        blog.login(&mut session, "admin", "admin").unwrap();
        session
    }

    #[test]
    fn test_search_scenario() {
        let blog = test_blog();
        let session = logged_in(&blog);
        blog.add(&session, "apple pie", "tasty").unwrap();
        blog.add(&session, "banana bread", "also tasty").unwrap();

        let found = blog.search("apple").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "apple pie");
        assert_eq!(found[0].text, "tasty");
    }

    #[test]
    fn test_wrong_password_then_add_is_refused() {
        let blog = test_blog();
        let mut session = Session::new(Duration::minutes(10));

        let err = blog.login(&mut session, "user", "wrong").unwrap_err();
        assert!(matches!(err, BlogError::InvalidCredentials));

        let err = blog.add(&session, "title", "text").unwrap_err();
        assert!(matches!(err, BlogError::NotAuthenticated));
        assert!(blog.index(&session).unwrap().posts.is_empty());
    }

    #[test]
    fn test_empty_title_leaves_store_unchanged() {
        let blog = test_blog();
        let session = logged_in(&blog);

        let err = blog.add(&session, "", "body").unwrap_err();
        assert!(matches!(
            err,
            BlogError::Validation(ValidationError::EmptyTitle)
        ));
        assert!(blog.index(&session).unwrap().posts.is_empty());
    }

    #[test]
    fn test_delete_requires_login() {
        let blog = test_blog();
        let mut session = logged_in(&blog);
        let post = blog.add(&session, "ToDelete", "please").unwrap();
        blog.logout(&mut session);

        let err = blog.delete(&session, post.id).unwrap_err();
        assert!(matches!(err, BlogError::NotAuthenticated));
        assert_eq!(blog.index(&session).unwrap().posts, vec![post.clone()]);

        blog.login(&mut session, "admin", "admin").unwrap();
        assert_eq!(
            blog.delete(&session, post.id).unwrap(),
            DeleteOutcome::Deleted
        );
        assert!(blog.index(&session).unwrap().posts.is_empty());
        assert_eq!(
            blog.delete(&session, post.id).unwrap(),
            DeleteOutcome::Missing
        );
    }

    #[test]
    fn test_reads_available_after_logout() {
        let blog = test_blog();
        let mut session = logged_in(&blog);
        blog.add(&session, "public", "read me").unwrap();
        blog.logout(&mut session);

        let view = blog.index(&session).unwrap();
        assert!(!view.authenticated);
        assert_eq!(view.posts.len(), 1);
        assert_eq!(blog.search("pub").unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let blog = test_blog();
        assert!(matches!(blog.get(42), Err(BlogError::NotFound(42))));
    }

    #[test]
    fn test_index_is_newest_first() {
        let blog = test_blog();
        let session = logged_in(&blog);
        let first = blog.add(&session, "first", "").unwrap();
        let second = blog.add(&session, "second", "").unwrap();

        let view = blog.index(&session).unwrap();
        assert!(view.authenticated);
        assert_eq!(view.posts, vec![second, first]);
    }
}
