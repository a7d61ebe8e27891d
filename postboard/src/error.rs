//! Error types shared by the store, the auth guard and the request handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::server::StatusBody;

/// Rejected user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title required")]
    EmptyTitle,
}

/// Errors surfaced by blog operations.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Permission denied: please log in.")]
    NotAuthenticated,

    #[error("No post with id {0}")]
    NotFound(i64),

    #[error("post store lock poisoned")]
    Poisoned,

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl BlogError {
    /// HTTP status used when the error reaches a JSON endpoint.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Poisoned | Self::Render(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed");
            "Internal error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(StatusBody::failure(message))).into_response()
    }
}

/// Result alias for blog operations.
pub type BlogResult<T> = Result<T, BlogError>;
