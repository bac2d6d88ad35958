//! quillpress: a minimal markdown blog engine
//!
//! Posts are markdown files with a small `key: value` front-matter block.
//! The server lists them newest first, renders each one through Tera
//! templates and forwards newsletter signups to Mailchimp.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod subscribe;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts
    pub posts_dir: PathBuf,
    /// Page templates
    pub templates_dir: PathBuf,
    /// Files served under /static
    pub static_dir: PathBuf,
    /// File served at /about
    pub about_page: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    ///
    /// Reads `_config.yml` when present, then applies `MAILCHIMP_*`
    /// environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let templates_dir = base_dir.join(&config.templates_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let about_page = base_dir.join(&config.about_page);

        Self {
            config,
            base_dir,
            posts_dir,
            templates_dir,
            static_dir,
            about_page,
        }
    }
}
