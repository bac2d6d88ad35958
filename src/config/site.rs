//! Site configuration (_config.yml)

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // Directory
    pub posts_dir: String,
    pub templates_dir: String,
    pub static_dir: String,
    pub about_page: String,

    // Display format for post dates (chrono syntax)
    pub date_format: String,

    // Server
    pub host: String,
    pub port: u16,

    // Newsletter
    #[serde(default)]
    pub mailchimp: MailchimpConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),

            posts_dir: "posts".to_string(),
            templates_dir: "templates".to_string(),
            static_dir: "static".to_string(),
            about_page: "static/about.html".to_string(),

            date_format: "%B %d, %Y".to_string(),

            host: "0.0.0.0".to_string(),
            port: 8080,

            mailchimp: MailchimpConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Override Mailchimp settings from `MAILCHIMP_*` environment variables
    pub fn apply_env(&mut self) {
        self.mailchimp.merge_from(|name| std::env::var(name).ok());
    }
}

/// Mailchimp list credentials
///
/// All three values are needed before a signup can be forwarded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MailchimpConfig {
    /// Data center prefix of the account, e.g. `us21`
    pub data_center: Option<String>,
    pub api_key: Option<String>,
    pub list_id: Option<String>,
}

impl MailchimpConfig {
    pub const DATA_CENTER_VAR: &'static str = "MAILCHIMP_DATA_CENTER";
    pub const API_KEY_VAR: &'static str = "MAILCHIMP_API_KEY";
    pub const LIST_ID_VAR: &'static str = "MAILCHIMP_LIST_ID";

    /// Replace values with those returned by `lookup`, skipping unset or empty ones
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (Self::DATA_CENTER_VAR, &mut self.data_center),
            (Self::API_KEY_VAR, &mut self.api_key),
            (Self::LIST_ID_VAR, &mut self.list_id),
        ];

        for (name, slot) in fields {
            if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
                tracing::debug!("Using {} from environment", name);
                *slot = Some(value);
            }
        }
    }

    /// All three values, if every one is present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        Some((
            non_empty(&self.data_center)?,
            non_empty(&self.api_key)?,
            non_empty(&self.list_id)?,
        ))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
