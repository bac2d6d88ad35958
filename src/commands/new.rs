//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::DATE_FORMAT;
use crate::Blog;

/// Write `posts/<slug>.md` with front-matter for today
///
/// The slug defaults to the slugified title. Existing files are never
/// overwritten.
pub fn create_post(
    blog: &Blog,
    title: &str,
    slug: Option<&str>,
    excerpt: Option<&str>,
) -> Result<PathBuf> {
    let excerpt = excerpt.unwrap_or_default();
    for (name, value) in [("title", title), ("excerpt", excerpt)] {
        if value.contains("---") || value.contains('\n') {
            anyhow::bail!("The {} cannot contain '---' or line breaks", name);
        }
        // Edge quotes would be stripped along with the ones written around the value
        if value.starts_with('"') || value.ends_with('"') {
            anyhow::bail!("The {} cannot start or end with '\"'", name);
        }
    }

    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.starts_with('.') || slug.contains(['/', '\\']) {
        anyhow::bail!("Invalid slug: {:?}", slug);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    let file_path = blog.posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let date = chrono::Local::now().format(DATE_FORMAT);
    let content = format!(
        "---\ntitle: \"{}\"\nexcerpt: \"{}\"\ndate: {}\n---\n\n",
        title, excerpt, date
    );

    fs::write(&file_path, content)?;
    tracing::debug!("Created post {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{load_posts, parse_date};
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "Hello, World!", None, Some("First words")).unwrap();

        assert_eq!(path, blog.posts_dir.join("hello-world.md"));
        let posts = load_posts(&blog.posts_dir).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello, World!");
        assert_eq!(posts[0].excerpt, "First words");
        assert!(parse_date(&posts[0].date).is_ok());
    }

    #[test]
    fn test_custom_slug() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "Anything", Some("my-slug"), None).unwrap();
        assert_eq!(path, blog.posts_dir.join("my-slug.md"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        create_post(&blog, "Twice", None, None).unwrap();
        assert!(create_post(&blog, "Twice", None, None).is_err());
    }

    #[test]
    fn test_rejects_separator_and_bad_slug() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert!(create_post(&blog, "A --- B", Some("ok"), None).is_err());
        assert!(create_post(&blog, "Fine", Some("../escape"), None).is_err());
        assert!(create_post(&blog, "???", None, None).is_err());
    }

    #[test]
    fn test_quotes_round_trip_only_inside_values() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert!(create_post(&blog, "Say \"hi\"", Some("edge"), None).is_err());
        assert!(create_post(&blog, "Fine", Some("edge"), Some("\"quoted\"")).is_err());

        create_post(&blog, "Say \"hi\" twice", Some("inner"), None).unwrap();
        let posts = load_posts(&blog.posts_dir).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Say \"hi\" twice");
    }
}
