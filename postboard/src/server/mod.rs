//! Postboard HTTP server.
//!
//! Endpoints:
//! - GET / - Index page with all posts
//! - POST /add - Create a post (requires login)
//! - GET /delete/{id} - Delete a post, JSON status (requires login)
//! - GET /search/?query= - Posts whose title contains the query
//! - GET|POST /login - Login form and credential check
//! - GET /logout - End the logged-in state
//! - GET /api/posts, GET /api/posts/{id} - Read-only JSON
//! - GET /static/* - Stylesheet and script

mod views;


use std::net::SocketAddr;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::blog::{Blog, DeleteOutcome};
use crate::db::Database;
use crate::error::{BlogError, BlogResult};
use crate::models::{FlashLevel, Post, Session};
use crate::session::{AuthGuard, Credentials, SessionStore};
use crate::store::SqlitePostStore;

use views::{render, IndexTemplate, LoginTemplate, SearchTemplate};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "postboard_session";

/// Everything `start_server` needs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub database: PathBuf,
    pub credentials: Credentials,
    pub session_ttl: Duration,
    pub static_dir: PathBuf,
    pub open_browser: bool,
}

/// Shared server state.
pub struct ServerState {
    /// Blog operations over the post store.
    blog: Blog,
    /// Live client sessions.
    sessions: SessionStore,
}

impl ServerState {
    /// Open the database and wire up the blog service.
    pub fn open(
        database: &FsPath,
        credentials: Credentials,
        session_ttl: Duration,
    ) -> Result<Self> {
        let db = Database::open_at(database)?;
        let store = SqlitePostStore::new(db);
        Ok(Self {
            blog: Blog::new(Arc::new(store), AuthGuard::new(credentials)),
            sessions: SessionStore::new(session_ttl),
        })
    }
}

// === Request/Response Types ===

/// JSON status body used by the delete endpoint and JSON errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    /// 1 on success, 0 on failure.
    pub status: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl StatusBody {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
            deleted: None,
        }
    }

    fn delete(outcome: DeleteOutcome) -> Self {
        let (message, deleted) = match outcome {
            DeleteOutcome::Deleted => ("Post Deleted", true),
            DeleteOutcome::Missing => ("No such post", false),
        };
        Self {
            status: 1,
            message: message.to_string(),
            deleted: Some(deleted),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

// === Server Lifecycle ===

/// Build the router over `state`.
pub fn router(state: Arc<ServerState>, static_dir: &FsPath) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/add", post(add_handler))
        .route("/delete/{id}", get(delete_handler))
        .route("/search", get(search_handler))
        .route("/search/", get(search_handler))
        .route("/login", get(login_form).post(login_handler))
        .route("/logout", get(logout_handler))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/{id}", get(get_post))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let state = ServerState::open(&config.database, config.credentials, config.session_ttl)?;
    let app = router(Arc::new(state), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    let url = format!("http://{}", config.addr);
    info!(%url, database = %config.database.display(), "postboard server starting");

    if config.open_browser {
        if let Err(err) = open::that(&url) {
            warn!(error = %err, "could not open browser");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("postboard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}

// === Sessions ===

async fn load_session(state: &ServerState, jar: &CookieJar) -> Session {
    let id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());
    state.sessions.resolve(id).await
}

/// Hand the client the cookie for `session`.
fn with_cookie(jar: CookieJar, session: &Session) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, session.id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();
    jar.add(cookie)
}

/// Queue a flash for the next page and make sure the client can find it.
async fn flash(
    state: &ServerState,
    jar: CookieJar,
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> CookieJar {
    state.sessions.flash(session, level, message).await;
    with_cookie(jar, session)
}

// === Handlers ===

async fn index_handler(State(state): State<Arc<ServerState>>, jar: CookieJar) -> Response {
    let session = load_session(&state, &jar).await;
    let flashes = state.sessions.take_flashes(&session).await;
    state
        .blog
        .index(&session)
        .and_then(|view| {
            render(&IndexTemplate {
                posts: view.posts,
                authenticated: view.authenticated,
                flashes,
            })
        })
        .into_response()
}

async fn add_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
    Form(form): Form<AddForm>,
) -> Response {
    let session = load_session(&state, &jar).await;
    match state.blog.add(&session, &form.title, &form.text) {
        Ok(_) => {
            let message = "New entry was successfully posted";
            let jar = flash(&state, jar, &session, FlashLevel::Info, message).await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(BlogError::Validation(err)) => {
            let jar = flash(&state, jar, &session, FlashLevel::Error, err.to_string()).await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn delete_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let session = load_session(&state, &jar).await;
    match state.blog.delete(&session, id) {
        Ok(outcome) => {
            let jar = if outcome == DeleteOutcome::Deleted {
                let message = "The entry was deleted.";
                flash(&state, jar, &session, FlashLevel::Info, message).await
            } else {
                jar
            };
            (jar, Json(StatusBody::delete(outcome))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn search_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
    Query(params): Query<SearchParams>,
) -> Response {
    let session = load_session(&state, &jar).await;
    let flashes = state.sessions.take_flashes(&session).await;
    state
        .blog
        .search(&params.query)
        .and_then(|posts| {
            render(&SearchTemplate {
                query: params.query,
                posts,
                authenticated: session.is_authenticated(),
                flashes,
            })
        })
        .into_response()
}

async fn login_form(State(state): State<Arc<ServerState>>, jar: CookieJar) -> Response {
    let session = load_session(&state, &jar).await;
    render(&LoginTemplate {
        error: None,
        authenticated: session.is_authenticated(),
        flashes: state.sessions.take_flashes(&session).await,
    })
    .into_response()
}

async fn login_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut session = load_session(&state, &jar).await;
    match state
        .blog
        .login(&mut session, &form.username, &form.password)
    {
        Ok(()) => {
            // A cookie issued before login never becomes authenticated.
            session.flash(FlashLevel::Info, "You were logged in");
            state.sessions.rotate(&mut session).await;
            (with_cookie(jar, &session), Redirect::to("/")).into_response()
        }
        Err(BlogError::InvalidCredentials) => render(&LoginTemplate {
            error: Some(BlogError::InvalidCredentials.to_string()),
            authenticated: session.is_authenticated(),
            flashes: state.sessions.take_flashes(&session).await,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

async fn logout_handler(State(state): State<Arc<ServerState>>, jar: CookieJar) -> Response {
    let mut session = load_session(&state, &jar).await;
    state.blog.logout(&mut session);
    session.flash(FlashLevel::Info, "You were logged out");
    state.sessions.save(session.clone()).await;
    (with_cookie(jar, &session), Redirect::to("/")).into_response()
}

async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> BlogResult<Json<Vec<Post>>> {
    Ok(Json(state.blog.search(&params.query)?))
}

async fn get_post(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<i64>,
) -> BlogResult<Json<Post>> {
    Ok(Json(state.blog.get(id)?))
}
