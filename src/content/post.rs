//! Post model and ordering

use chrono::NaiveDate;
use serde::Serialize;

/// Format every post date must follow
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A blog post, as listed on the home page or shown on its own page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Short summary, may be empty
    pub excerpt: String,

    /// Date exactly as written in the front-matter
    pub date: String,

    /// Parsed publication date, only used for ordering
    #[serde(skip)]
    pub parsed_date: Option<NaiveDate>,

    /// File name without the `.md` extension
    pub filename: String,

    /// Rendered HTML body (single-post view only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Post {
    /// URL path of the post page
    pub fn path(&self) -> String {
        format!("/posts/{}", self.filename)
    }
}

/// Parse a front-matter date string
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

/// Sort posts by date descending (newest first)
///
/// Equal dates keep their relative order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.parsed_date.cmp(&a.parsed_date));
}
