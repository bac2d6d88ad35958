//! Content loader - loads posts from the posts directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::post::parse_date;
use super::{ContentRenderer, FrontMatter, Post};

/// Extension of post files
const POST_EXTENSION: &str = ".md";

/// Errors while loading content
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The posts directory itself could not be listed
    #[error("failed to read posts directory {path:?}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },

    /// No post exists for the requested slug
    #[error("post not found: {0}")]
    NotFound(String),

    /// The post file exists but could not be read
    #[error("failed to read post {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The content renderer rejected the post body
    #[error("failed to render post {slug}: {source}")]
    Render {
        slug: String,
        source: anyhow::Error,
    },
}

/// Load every dated post in `posts_dir`
///
/// Files that cannot be read or carry no valid `date` are skipped with a
/// warning. Only a failure to list the directory is an error. The result is
/// in directory order; use [`super::sort_posts`] to order it.
pub fn load_posts(posts_dir: &Path) -> Result<Vec<Post>, ContentError> {
    let entries = fs::read_dir(posts_dir).map_err(|source| ContentError::ReadDir {
        path: posts_dir.to_path_buf(),
        source,
    })?;

    let mut posts = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read entry in {:?}: {}", posts_dir, e);
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
            continue;
        };
        let Some(slug) = file_name.strip_suffix(POST_EXTENSION) else {
            continue;
        };

        let path = entry.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read post {:?}: {}", path, e);
                continue;
            }
        };

        let (fm, _) = FrontMatter::parse(&raw);
        let parsed_date = match parse_date(fm.date()) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(
                    "Skipping post {:?}: invalid date {:?}: {}",
                    path,
                    fm.date(),
                    e
                );
                continue;
            }
        };

        posts.push(Post {
            title: fm.title().to_string(),
            excerpt: fm.excerpt().to_string(),
            date: fm.date().to_string(),
            parsed_date: Some(parsed_date),
            filename: slug.to_string(),
            content: None,
        });
    }

    tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);

    Ok(posts)
}

/// Load a single post by slug and render its body
///
/// The date is taken as written; a post with a bad date still renders here
/// even though the home listing leaves it out.
pub fn load_post(
    posts_dir: &Path,
    slug: &str,
    renderer: &dyn ContentRenderer,
) -> Result<Post, ContentError> {
    if !is_valid_slug(slug) {
        return Err(ContentError::NotFound(slug.to_string()));
    }

    let path = posts_dir.join(format!("{}{}", slug, POST_EXTENSION));
    let raw = fs::read_to_string(&path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ContentError::NotFound(slug.to_string())
        } else {
            ContentError::Read {
                path: path.clone(),
                source,
            }
        }
    })?;

    let (fm, body) = FrontMatter::parse(&raw);
    let content = renderer
        .render(body)
        .map_err(|source| ContentError::Render {
            slug: slug.to_string(),
            source,
        })?;

    Ok(Post {
        title: fm.title().to_string(),
        excerpt: fm.excerpt().to_string(),
        date: fm.date().to_string(),
        parsed_date: parse_date(fm.date()).ok(),
        filename: slug.to_string(),
        content: Some(content),
    })
}

/// A slug must name a file directly inside the posts directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}
