//! Markdown render adapters

mod comrak;
mod pulldown_cmark;

pub use comrak::ComrakRenderer;
pub use pulldown_cmark::PulldownCmarkRenderer;
