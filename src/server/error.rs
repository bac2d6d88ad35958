//! Error responses for the HTTP server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::content::ContentError;
use crate::subscribe::SubscribeError;

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No route or post matches the request
    #[error("404 page not found")]
    NotFound,

    /// The request body could not be understood
    #[error("{0}")]
    BadRequest(&'static str),

    /// Loading posts failed
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Rendering a page template failed
    #[error("template error: {0:#}")]
    Template(anyhow::Error),

    /// Forwarding a signup failed
    #[error(transparent)]
    Subscribe(#[from] SubscribeError),

    /// A background task died
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound | Self::Content(ContentError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "404 page not found".to_string())
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            // The downstream failure is reported back to the caller
            Self::Subscribe(e) => {
                tracing::warn!("Subscription failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            Self::Content(_) | Self::Template(_) | Self::Internal(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ServerError::NotFound, StatusCode::NOT_FOUND),
            (
                ServerError::Content(ContentError::NotFound("x".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::BadRequest("Error decoding request"),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::Subscribe(SubscribeError::NotConfigured),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServerError::Template(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
