//! Data models for postboard entities.

mod post;
mod session;

pub use post::Post;
pub use session::{AuthState, Flash, FlashLevel, Session};
