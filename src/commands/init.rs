//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::DATE_FORMAT;
use crate::templates::DEFAULT_TEMPLATES;
use crate::CONFIG_FILE;

const CONFIG_CONTENT: &str = r#"# Site
title: My Blog
description: ''
author: ''

# Directory
posts_dir: posts
templates_dir: templates
static_dir: static
about_page: static/about.html

# Post dates are written as YYYY-MM-DD and shown with this chrono format
date_format: '%B %d, %Y'

# Server
host: 0.0.0.0
port: 8080

# Newsletter signups. MAILCHIMP_DATA_CENTER, MAILCHIMP_API_KEY and
# MAILCHIMP_LIST_ID take precedence over these values.
mailchimp:
  data_center:
  api_key:
  list_id:
"#;

const ABOUT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>About</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>About</h1>
    <p>Tell your readers who you are.</p>
    <p><a href="/">Back to posts</a></p>
  </main>
</body>
</html>
"#;

const STYLESHEET: &str = r#"body { max-width: 42rem; margin: 0 auto; padding: 1rem; font-family: sans-serif; line-height: 1.6; }
header, footer { display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.post-list { list-style: none; padding: 0; }
.post-list h2 { margin-bottom: 0; }
time { color: #666; }
pre { overflow-x: auto; padding: 0.75rem; background: #f5f5f5; }
"#;

const SUBSCRIBE_SCRIPT: &str = r#"const form = document.getElementById("subscribe-form");

if (form) {
  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    const emailInput = document.getElementById("email");

    try {
      const response = await fetch("/subscribe", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ email: emailInput.value }),
      });
      alert(await response.text());
      if (response.ok) {
        emailInput.value = "";
      }
    } catch (error) {
      console.error("Error:", error);
      alert("Error: Subscription failed.");
    }
  });
}
"#;

/// Initialize a new blog in the given directory
///
/// Files that already exist are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("templates"))?;
    fs::create_dir_all(target_dir.join("static/scripts"))?;

    write_if_missing(&target_dir.join(CONFIG_FILE), CONFIG_CONTENT)?;

    for (name, content) in DEFAULT_TEMPLATES {
        write_if_missing(&target_dir.join("templates").join(name), content)?;
    }

    write_if_missing(&target_dir.join("static/about.html"), ABOUT_PAGE)?;
    write_if_missing(&target_dir.join("static/style.css"), STYLESHEET)?;
    write_if_missing(
        &target_dir.join("static/scripts/subscribe.js"),
        SUBSCRIBE_SCRIPT,
    )?;

    // Create a sample post
    let today = chrono::Local::now().format(DATE_FORMAT);
    let sample_post = format!(
        r#"---
title: "Hello World"
excerpt: "Your very first post."
date: {}
---

Welcome! This post lives in `posts/hello-world.md`.

## Writing posts

Every post starts with a front-matter block:

```yaml
title: "A title"
excerpt: "One line for the home page"
date: 2024-01-05
```

Posts without a valid `YYYY-MM-DD` date are left off the home page.

## Run the server

```bash
$ quillpress server
```
"#,
        today
    );
    write_if_missing(&target_dir.join("posts/hello-world.md"), &sample_post)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{load_posts, sort_posts};
    use crate::templates::{
        home_data, SiteData, TemplateEngine, TeraTemplates, INDEX_TEMPLATE,
    };
    use crate::Blog;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        for file in [
            CONFIG_FILE,
            "templates/base.html",
            "templates/index.html",
            "templates/post.html",
            "static/about.html",
            "static/scripts/subscribe.js",
        ] {
            assert!(dir.path().join(file).is_file(), "missing {}", file);
        }

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.title, "My Blog");
        assert_eq!(blog.config.date_format, "%B %d, %Y");

        let posts = load_posts(&blog.posts_dir).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello World");
    }

    #[test]
    fn test_initialized_site_renders() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let templates =
            TeraTemplates::load(&blog.templates_dir, &blog.config.date_format).unwrap();
        let mut posts = load_posts(&blog.posts_dir).unwrap();
        sort_posts(&mut posts);

        let html = templates
            .render(INDEX_TEMPLATE, &home_data(&SiteData::from(&blog.config), &posts))
            .unwrap();
        assert!(html.contains("Hello World"));
        assert!(html.contains(r#"href="/posts/hello-world""#));
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: Mine\n").unwrap();

        init_site(dir.path()).unwrap();

        let config = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
