//! Markdown renderer seam

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::errors::RenderError;

/// Strategy converting markdown text to HTML text.
///
/// Implementations are expected to accept any string input and render
/// best-effort rather than reject malformed markup. An error, if one is
/// signalled anyway, is surfaced to the caller unmodified.
pub trait MarkdownRenderer {
    /// Renders `markdown` to an HTML fragment.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

#[cfg(test)]
mock! {
    pub MarkdownRenderer {}

    impl MarkdownRenderer for MarkdownRenderer {
        fn render(&self, markdown: &str) -> Result<String, RenderError>;
    }
}
