//! Content module - front-matter, post loading and markdown rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::{load_post, load_posts, ContentError};
pub use markdown::{ContentRenderer, MarkdownRenderer};
pub use post::{parse_date, sort_posts, Post, DATE_FORMAT};
