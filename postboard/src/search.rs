//! Title search over posts.

use crate::models::Post;

/// Posts whose title contains `query`, in their original order.
///
/// Matching is case-sensitive. An empty query matches every post.
pub fn search(query: &str, posts: &[Post]) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| post.title.contains(query))
        .cloned()
        .collect()
}
