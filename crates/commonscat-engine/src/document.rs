use xi_rope::Rope;

use crate::detect::detect;
use crate::registry::AliasRegistry;
use crate::wikitext::{Template, parse_templates};

/// One article's wikitext, read-only for the length of one decision.
///
/// The text is held in a rope exactly as fetched. Everything downstream works
/// on its line sequence, and any edit produces the lines joined with `\n`:
/// `\r\n` endings and a single trailing newline are not preserved, which
/// MediaWiki normalizes away on save anyway.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
        }
    }

    /// Lines without their endings.
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines(..).map(|line| line.into_owned()).collect()
    }

    /// The lines joined with `\n`; the text every span and edit refers to.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn templates(&self) -> Vec<Template> {
        parse_templates(&self.text())
    }

    pub fn has_marker(&self, registry: &AliasRegistry) -> bool {
        detect(&self.templates(), registry)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
