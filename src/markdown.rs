//! Markdown rendering for the wiki's restricted dialect.
//!
//! This module converts entry text into HTML fragments through an ordered
//! pipeline of text passes (headings, links, bold, italic, lists,
//! paragraphs) and optionally resolves wiki route links to exported entry
//! files.

mod links;
mod passes;
mod renderer;

pub use links::{DEFAULT_ROUTE_PREFIX, LinkResolver};
pub use passes::Pass;
pub use renderer::{MarkdownRenderer, markdown_to_html};
