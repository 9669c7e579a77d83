//! CommonMark render pipeline

use pulldown_cmark::{html, Parser};

use crate::domain::mail::{errors::RenderError, MarkdownRenderer};

/// Markdown renderer backed by the plain CommonMark parser, with no
/// extension configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct PulldownCmarkRenderer;

impl PulldownCmarkRenderer {
    /// Creates the renderer.
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for PulldownCmarkRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new(markdown);
        let mut buf = String::new();
        html::push_html(&mut buf, parser);

        Ok(buf)
    }
}
