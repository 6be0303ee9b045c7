//! Wiki entry storage and rendering of a small Markdown dialect.

mod config;
mod entries;
mod export;
mod markdown;

pub use config::{Command, Config};
pub use entries::{EntryStore, SearchResult};
pub use export::export_entries;
pub use markdown::{DEFAULT_ROUTE_PREFIX, LinkResolver, MarkdownRenderer, Pass, markdown_to_html};
