//! Comrak render pipeline

use comrak::{markdown_to_html, ComrakOptions};

use crate::domain::mail::{errors::RenderError, MarkdownRenderer};

/// Markdown renderer backed by the comrak pipeline.
///
/// The default pipeline treats single newlines as hard line breaks and
/// enables the extension bundle mail bodies tend to use: tables,
/// strikethrough, autolinks, task lists, footnotes, description lists and
/// superscript.
#[derive(Clone, Debug)]
pub struct ComrakRenderer {
    options: ComrakOptions,
}

impl ComrakRenderer {
    /// Creates a renderer with the default pipeline.
    pub fn new() -> Self {
        let mut options = ComrakOptions::default();
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;
        options.extension.superscript = true;
        options.render.hardbreaks = true;

        Self { options }
    }

    /// Creates a renderer with a caller-built pipeline.
    pub fn with_options(options: ComrakOptions) -> Self {
        Self { options }
    }
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        Ok(markdown_to_html(markdown, &self.options))
    }
}
