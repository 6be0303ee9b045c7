use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wikimark::{
    Command, Config, EntryStore, LinkResolver, MarkdownRenderer, SearchResult, export_entries,
};

/// Installs the stderr log subscriber.
///
/// RUST_LOG wins over `--log-level` when set. Logs go to stderr so stdout
/// carries only rendered HTML and titles.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Renders a file, or standard input when no file is given.
fn render(file: Option<&Path>) -> Result<()> {
    let renderer = MarkdownRenderer::new();

    let html = match file {
        Some(path) => renderer.render_file(path)?,
        None => {
            let content = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
            renderer.render(&content)
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", html).context("Failed to write output")?;
    Ok(())
}

fn export(entries: &Path, output: &Path, resolve_links: bool) -> Result<()> {
    let store = EntryStore::new(entries);
    let renderer = if resolve_links {
        MarkdownRenderer::with_link_resolver(LinkResolver::default())
    } else {
        MarkdownRenderer::new()
    };

    let written = export_entries(&store, &renderer, output).context("Failed to export entries")?;

    if written.is_empty() {
        warn!(entries = %entries.display(), "No entries found");
    }
    info!(
        "Generated {} entry fragments in {}",
        written.len(),
        output.display()
    );
    Ok(())
}

fn list(entries: &Path) -> Result<()> {
    let titles = EntryStore::new(entries).list_entries()?;

    let mut stdout = io::stdout().lock();
    for title in &titles {
        writeln!(stdout, "{}", title).context("Failed to write output")?;
    }
    info!("Listed {} entries", titles.len());
    Ok(())
}

fn search(query: &str, entries: &Path) -> Result<()> {
    let result = EntryStore::new(entries).search(query)?;

    let mut stdout = io::stdout().lock();
    match result {
        SearchResult::Exact(title) => {
            writeln!(stdout, "{}", title).context("Failed to write output")?;
        }
        SearchResult::Partial(titles) if titles.is_empty() => {
            info!(query, "No entries match");
        }
        SearchResult::Partial(titles) => {
            for title in &titles {
                writeln!(stdout, "{}", title).context("Failed to write output")?;
            }
            info!(query, "Found {} partial matches", titles.len());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level);
    config.validate().context("Invalid configuration")?;

    match &config.command {
        Command::Render { file } => render(file.as_deref()),
        Command::Export {
            entries,
            output,
            resolve_links,
        } => export(entries, output, *resolve_links),
        Command::List { entries } => list(entries),
        Command::Search { query, entries } => search(query, entries),
    }
}
