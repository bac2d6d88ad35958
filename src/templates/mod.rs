//! Page templates using the Tera template engine
//!
//! Templates are read from the site's templates directory. Any of the
//! built-in templates the directory does not provide falls back to the copy
//! embedded in the binary.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Post, DATE_FORMAT};

/// Template for the home page listing
pub const INDEX_TEMPLATE: &str = "index.html";

/// Template for a single post
pub const POST_TEMPLATE: &str = "post.html";

/// Built-in templates, also written out by `init`
pub const DEFAULT_TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("default/base.html")),
    (INDEX_TEMPLATE, include_str!("default/index.html")),
    (POST_TEMPLATE, include_str!("default/post.html")),
];

/// Renders named templates with JSON data
pub trait TemplateEngine: Send + Sync {
    /// Render a template with the given data
    fn render(&self, template_name: &str, data: &serde_json::Value) -> Result<String>;
}

/// Tera-backed template engine
pub struct TeraTemplates {
    tera: Tera,
}

impl TeraTemplates {
    /// Load templates from `templates_dir`, filling gaps with built-in ones
    pub fn load(templates_dir: &Path, date_format: &str) -> Result<Self> {
        // Parse without resolving `extends`, so directory templates may
        // inherit from built-in ones added below
        let mut tera = if templates_dir.is_dir() {
            let pattern = format!("{}/**/*.html", templates_dir.display());
            let tera = Tera::parse(&pattern)
                .with_context(|| format!("Failed to load templates from {:?}", templates_dir))?;
            tracing::debug!(
                "Loaded {} templates from {:?}",
                tera.get_template_names().count(),
                templates_dir
            );
            tera
        } else {
            tracing::info!(
                "Templates directory {:?} not found, using built-in templates",
                templates_dir
            );
            Tera::default()
        };

        let missing: Vec<_> = DEFAULT_TEMPLATES
            .iter()
            .filter(|(name, _)| !tera.get_template_names().any(|n| n == *name))
            .copied()
            .collect();
        // Also builds the inheritance chains for everything loaded so far
        tera.add_raw_templates(missing)
            .with_context(|| format!("Failed to load templates from {:?}", templates_dir))?;

        let format = date_format.to_string();
        tera.register_filter(
            "date_format",
            move |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                date_format_filter(value, args, &format)
            },
        );

        Ok(Self { tera })
    }

    /// Only the built-in templates
    pub fn builtin(date_format: &str) -> Result<Self> {
        Self::load(Path::new(""), date_format)
    }
}

impl TemplateEngine for TeraTemplates {
    fn render(&self, template_name: &str, data: &serde_json::Value) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(template_name, &context)?)
    }
}

/// Tera filter: reformat a `YYYY-MM-DD` date string
///
/// Uses the `format` argument when given, the site's format otherwise.
/// Strings that are not valid dates pass through unchanged.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
    default_format: &str,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => default_format.to_string(),
    };

    match chrono::NaiveDate::parse_from_str(&s, DATE_FORMAT) {
        Ok(date) => Ok(tera::Value::String(date.format(&format).to_string())),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
        }
    }
}

/// Data for the home page: `site` and the sorted `posts`
pub fn home_data(site: &SiteData, posts: &[Post]) -> serde_json::Value {
    serde_json::json!({
        "site": site,
        "posts": posts,
    })
}

/// Data for a post page: `site` and the rendered `post`
pub fn post_data(site: &SiteData, post: &Post) -> serde_json::Value {
    serde_json::json!({
        "site": site,
        "post": post,
    })
}
