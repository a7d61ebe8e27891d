//! HTML page templates.

use askama::Template;
use axum::response::Html;

use crate::error::BlogResult;
use crate::models::{Flash, Post};

/// Front page: every post plus the add form when logged in.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub posts: Vec<Post>,
    pub authenticated: bool,
    pub flashes: Vec<Flash>,
}

/// Search results for a title query.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub posts: Vec<Post>,
    pub authenticated: bool,
    pub flashes: Vec<Flash>,
}

/// Login form, optionally showing why the last attempt failed.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub authenticated: bool,
    pub flashes: Vec<Flash>,
}

pub fn render<T: Template>(template: &T) -> BlogResult<Html<String>> {
    Ok(Html(template.render()?))
}
