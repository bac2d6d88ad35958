//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Turns a post body into HTML
pub trait ContentRenderer: Send + Sync {
    /// Render markdown to HTML
    fn render(&self, markdown: &str) -> Result<String>;
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::Spaced,
        );

        let highlighted = LinesWithEndings::from(code)
            .try_for_each(|line| generator.parse_html_for_line_which_includes_newline(line));

        let body = match highlighted {
            Ok(()) => generator.finalize(),
            Err(e) => {
                tracing::debug!("Highlighting {} failed, emitting plain code: {}", lang, e);
                html_escape(code)
            }
        };

        format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            html_escape(lang),
            body
        )
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new_ext(markdown, Self::options());

        let mut events: Vec<Event> = Vec::new();
        // (language, source) of the fenced or indented block being collected
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code_block.take() {
                        let highlighted = self.highlight_code(&source, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, source)) => source.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => {
                    events.push(Event::InlineHtml(CowStr::from(open_link(
                        link_type, &dest_url, &title,
                    ))));
                }
                Event::End(TagEnd::Link) => {
                    events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                }
                _ => events.push(event),
            }
        }

        assign_heading_ids(&mut events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// First word of a fence info string, e.g. `rust` in "```rust,ignore"
fn info_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

/// Opening anchor tag; every link opens in a new tab
fn open_link(link_type: LinkType, dest_url: &str, title: &str) -> String {
    let href = if link_type == LinkType::Email {
        format!("mailto:{}", dest_url)
    } else {
        dest_url.to_string()
    };

    let mut tag = format!(r#"<a href="{}""#, html_escape(&href));
    if !title.is_empty() {
        tag.push_str(&format!(r#" title="{}""#, html_escape(title)));
    }
    tag.push_str(r#" target="_blank">"#);
    tag
}

/// Give each heading without an explicit id one derived from its text
///
/// Explicit ids are reserved first, so derived ids never reuse them.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    for i in 0..events.len() {
        if !matches!(&events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }

        let mut text = String::new();
        for event in &events[i + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let id = unique_id(slug::slugify(&text), &mut used);
        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
            *slot = Some(CowStr::from(id));
        }
    }
}

/// First of `base`, `base-1`, `base-2`, ... not yet taken, marked as taken
fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let mut candidate = base.clone();
    let mut n = 0;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{}-{}", base, n);
    }
    used.insert(candidate.clone());
    candidate
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Intro paragraph.\n\n**bold** text").unwrap();
        assert!(html.contains("<p>Intro paragraph.</p>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_heading_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("# Hello World\n\n## Setup\n\n## Setup\n\n## `cargo` usage")
            .unwrap();
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains(r#"<h2 id="setup">Setup</h2>"#));
        assert!(html.contains(r#"<h2 id="setup-1">Setup</h2>"#));
        assert!(html.contains(r#"id="cargo-usage""#));
    }

    #[test]
    fn test_heading_ids_never_repeat() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("## Setup\n\n## Setup\n\n## Setup 1\n\n## Later {#setup-3}\n\n## Setup\n")
            .unwrap();

        for id in ["setup", "setup-1", "setup-1-1", "setup-2", "setup-3"] {
            let attr = format!(r#"id="{}""#, id);
            assert_eq!(html.matches(&attr).count(), 1, "{} in {}", id, html);
        }
    }

    #[test]
    fn test_explicit_heading_id_is_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Install {#getting-started}").unwrap();
        assert!(html.contains(r#"<h2 id="getting-started">Install</h2>"#));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render(r#"See [the docs](https://example.com/a?b=1&c=2 "Docs") now."#)
            .unwrap();
        assert!(html.contains(
            r#"<a href="https://example.com/a?b=1&amp;c=2" title="Docs" target="_blank">the docs</a>"#
        ));
    }

    #[test]
    fn test_email_autolink() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Write to <me@example.com>").unwrap();
        assert!(html.contains(r#"href="mailto:me@example.com""#));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("main"));
        assert!(html.contains("<span class="));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\n<b>&</b>\n```").unwrap();
        assert!(html.contains(r#"class="language-nosuchlang""#));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_info_language() {
        assert_eq!(info_language("rust,ignore"), Some("rust".to_string()));
        assert_eq!(info_language("python title=x"), Some("python".to_string()));
        assert_eq!(info_language(""), None);
    }
}
