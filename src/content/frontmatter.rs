//! Front-matter parsing

use std::collections::HashMap;

/// Line that opens and closes a front-matter block
const SEPARATOR: &str = "---";

/// Key-value metadata from the head of a post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: HashMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// The block is whatever sits between the first and second `---`. When
    /// the separator does not appear twice the whole input is the body.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some(open) = content.find(SEPARATOR) else {
            return (Self::default(), content);
        };
        let after_open = &content[open + SEPARATOR.len()..];

        let Some(close) = after_open.find(SEPARATOR) else {
            return (Self::default(), content);
        };

        let block = &after_open[..close];
        let body = &after_open[close + SEPARATOR.len()..];

        (Self::parse_block(block), body)
    }

    fn parse_block(block: &str) -> Self {
        let mut fields = HashMap::new();

        for line in block.lines() {
            if line.trim().is_empty() {
                continue;
            }

            // Lines without a colon carry nothing
            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim().trim_matches('"');
                fields.insert(key.trim().to_string(), value.to_string());
            }
        }

        Self { fields }
    }

    /// Look up a raw field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field value, or an empty string when the key is absent
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.get_or_empty("title")
    }

    pub fn excerpt(&self) -> &str {
        self.get_or_empty("excerpt")
    }

    pub fn date(&self) -> &str {
        self.get_or_empty("date")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
