//! Export of rendered entries to fragment files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::entries::EntryStore;
use crate::markdown::MarkdownRenderer;

/// Renders every entry of a store into `<output>/<Title>.html`.
///
/// Creates the output directory if needed. Existing fragments with the same
/// name are overwritten. Entries removed between listing and reading are
/// skipped with a warning.
///
/// # Arguments
///
/// * `store`: Entries to export
/// * `renderer`: Renderer applied to each entry
/// * `output`: Destination directory
///
/// # Returns
///
/// Paths of written fragments, in title order
///
/// # Errors
///
/// Returns error if entries cannot be listed or read, or a fragment cannot
/// be written
pub fn export_entries(
    store: &EntryStore,
    renderer: &MarkdownRenderer,
    output: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let output = output.as_ref();
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let titles = store.list_entries().context("Failed to list entries")?;
    let mut written = Vec::with_capacity(titles.len());

    for title in titles {
        let Some(content) = store
            .get_entry(&title)
            .with_context(|| format!("Failed to load entry {}", title))?
        else {
            warn!(title = %title, "Entry disappeared during export");
            continue;
        };

        let path = output.join(format!("{}.html", title));
        fs::write(&path, renderer.render(&content))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(path = %path.display(), "Generated entry fragment");
        written.push(path);
    }

    Ok(written)
}
