#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Markdown mail delivery: renders a markdown body to HTML, keeps the raw
//! source as the plain-text alternative and dispatches the two-view message
//! through a configurable transport client.

pub mod domain;
pub mod infrastructure;
