// ABOUTME: Shared HTTP response plumbing: askama page rendering and the handler error type
// ABOUTME: Storage failures become a logged 500; malformed or oversized uploads keep their 4xx status

use askama::Template;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Render an askama template as an HTML response
pub struct HtmlTemplate<T>(pub T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render template");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

/// Error returned by request handlers
#[derive(Debug)]
pub enum AppError {
    /// The request itself was unusable; carries the client-error status to send
    Rejected(StatusCode, String),
    /// Anything failing on our side (database, disk, session store)
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Rejected(status, message) => {
                tracing::warn!(status = %status, message = %message, "Rejected request");
                (status, message).into_response()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %format!("{:#}", e), "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e)
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(e: tower_sessions::session::Error) -> Self {
        AppError::Internal(anyhow::Error::new(e).context("Session store failure"))
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Rejected(e.status(), e.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
