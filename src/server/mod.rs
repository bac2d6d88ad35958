//! Blog HTTP server
//!
//! Routes:
//! - `GET /` lists every dated post, newest first
//! - `GET /posts/{slug}` renders one post
//! - `POST /subscribe` forwards a newsletter signup
//! - `GET /about` and `GET /static/*` serve files as they are

mod error;
mod handlers;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use error::ServerError;
pub use handlers::SubscribeRequest;

use crate::content::{ContentRenderer, MarkdownRenderer};
use crate::subscribe::{MailchimpClient, MailingList};
use crate::templates::{SiteData, TemplateEngine, TeraTemplates};
use crate::Blog;

/// Shared, read-only server state
pub struct AppState {
    pub posts_dir: PathBuf,
    pub static_dir: PathBuf,
    pub about_page: PathBuf,
    pub site: SiteData,
    pub templates: Arc<dyn TemplateEngine>,
    pub renderer: Arc<dyn ContentRenderer>,
    pub mailing_list: Arc<dyn MailingList>,
}

impl AppState {
    /// Build the production state: Tera templates, markdown and Mailchimp
    pub fn from_blog(blog: &Blog) -> Result<Self> {
        let templates = TeraTemplates::load(&blog.templates_dir, &blog.config.date_format)?;
        let mailchimp = MailchimpClient::new(blog.config.mailchimp.clone());
        if !mailchimp.is_configured() {
            tracing::warn!("Mailchimp is not configured, signups will fail");
        }

        Ok(Self {
            posts_dir: blog.posts_dir.clone(),
            static_dir: blog.static_dir.clone(),
            about_page: blog.about_page.clone(),
            site: SiteData::from(&blog.config),
            templates: Arc::new(templates),
            renderer: Arc::new(MarkdownRenderer::new()),
            mailing_list: Arc::new(mailchimp),
        })
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/posts/:slug", get(handlers::post))
        .route("/subscribe", post(handlers::subscribe))
        .route_service("/about", ServeFile::new(&state.about_page))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until Ctrl+C
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_blog(blog)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, stopping server..."),
        Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
    }
}
