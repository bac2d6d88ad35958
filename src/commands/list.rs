//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::{load_posts, sort_posts};
use crate::Blog;

/// Print every listed post, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let stdout = std::io::stdout();
    write_posts(blog, &mut stdout.lock())
}

fn write_posts<W: Write>(blog: &Blog, out: &mut W) -> Result<()> {
    let mut posts = load_posts(&blog.posts_dir)?;
    sort_posts(&mut posts);

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        writeln!(out, "  {} - {} [{}]", post.date, post.title, post.path())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_posts() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir(&posts).unwrap();
        fs::write(posts.join("old.md"), "---\ntitle: Old\ndate: 2023-05-01\n---\n").unwrap();
        fs::write(posts.join("new.md"), "---\ntitle: New\ndate: 2024-05-01\n---\n").unwrap();
        fs::write(posts.join("bad.md"), "---\ntitle: Bad\ndate: tomorrow\n---\n").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let mut out = Vec::new();
        write_posts(&blog, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Posts (2):\n  2024-05-01 - New [/posts/new]\n  2023-05-01 - Old [/posts/old]\n"
        );
    }

    #[test]
    fn test_list_without_posts_dir() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert!(write_posts(&blog, &mut Vec::new()).is_err());
    }
}
