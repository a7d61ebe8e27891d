//! Client sessions and the single-credential auth guard.

mod guard;
mod store;

pub use guard::{AuthGuard, Credentials};
pub use store::SessionStore;
