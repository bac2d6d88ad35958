//! Route handlers

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Html;
use serde::Deserialize;

use super::error::ServerError;
use super::AppState;
use crate::content::{load_post, load_posts, sort_posts};
use crate::templates::{home_data, post_data, INDEX_TEMPLATE, POST_TEMPLATE};

/// Body of POST /subscribe
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Handle GET /
///
/// The posts directory is scanned again on every request.
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let posts_dir = state.posts_dir.clone();
    let posts = blocking(move || {
        let mut posts = load_posts(&posts_dir)?;
        sort_posts(&mut posts);
        Ok(posts)
    })
    .await?;

    let html = state
        .templates
        .render(INDEX_TEMPLATE, &home_data(&state.site, &posts))
        .map_err(ServerError::Template)?;

    Ok(Html(html))
}

/// Handle GET /posts/{slug}
pub async fn post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ServerError> {
    let posts_dir = state.posts_dir.clone();
    let renderer = Arc::clone(&state.renderer);
    let post = blocking(move || Ok(load_post(&posts_dir, &slug, renderer.as_ref())?)).await?;

    let html = state
        .templates
        .render(POST_TEMPLATE, &post_data(&state.site, &post))
        .map_err(ServerError::Template)?;

    Ok(Html(html))
}

/// Handle POST /subscribe
///
/// The body is decoded as JSON whatever its declared content type.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<String, ServerError> {
    let request: SubscribeRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejecting subscription body: {}", e);
        ServerError::BadRequest("Error decoding request")
    })?;

    tracing::info!("Email submitted: {}", request.email);

    let mailing_list = Arc::clone(&state.mailing_list);
    let email = request.email.clone();
    blocking(move || Ok(mailing_list.subscribe(&email)?)).await?;

    Ok(format!("Subscription successful for email: {}", request.email))
}

/// Run file reads, highlighting and outbound HTTP off the async workers
async fn blocking<T, F>(f: F) -> Result<T, ServerError>
where
    F: FnOnce() -> Result<T, ServerError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
}

/// Fallback for unknown routes
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
