//! File backed storage of encyclopedia entries.
//!
//! Each entry is a Markdown file named `<Title>.md` inside one directory.
//! The store only reads: it lists titles, fetches content by title, and
//! searches titles.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of entry files.
const ENTRY_EXTENSION: &str = "md";

/// Outcome of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Query names an entry, ignoring case.
    Exact(String),
    /// Titles containing the query, ignoring case, sorted.
    Partial(Vec<String>),
}

/// Read only view over a directory of entry files.
///
/// Creating, replacing and deleting entries belong to whatever edits the
/// directory; the store never writes to it.
#[derive(Debug, Clone)]
pub struct EntryStore {
    root: PathBuf,
}

impl EntryStore {
    /// Creates store over the given entries directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns entries directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists all entry titles in ascending order.
    ///
    /// Titles are the file stems of `*.md` files directly inside the entries
    /// directory. Subdirectories and other files are ignored.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be read
    pub fn list_entries(&self) -> Result<Vec<String>> {
        let dir = fs::read_dir(&self.root).with_context(|| {
            format!("Failed to read entries directory: {}", self.root.display())
        })?;

        let mut titles = Vec::new();
        for item in dir {
            let item = item.context("Failed to read directory entry")?;
            let path = item.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION)
            {
                continue;
            }

            match path.file_stem().and_then(|s| s.to_str()) {
                Some(title) => titles.push(title.to_string()),
                None => debug!(path = %path.display(), "Skipping entry with non UTF8 name"),
            }
        }

        titles.sort();
        Ok(titles)
    }

    /// Retrieves entry content by title.
    ///
    /// # Returns
    ///
    /// Entry Markdown, or None if no such entry exists
    ///
    /// # Errors
    ///
    /// Returns error if the title is not a plain file name, or the file
    /// exists but cannot be read as UTF8
    pub fn get_entry(&self, title: &str) -> Result<Option<String>> {
        validate_title(title)?;

        let path = self.entry_path(title);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(title, bytes = content.len(), "Loaded entry");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(title, "Entry not found");
                Ok(None)
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read entry: {}", path.display()))
            }
        }
    }

    /// Searches titles, ignoring case.
    ///
    /// A query equal to a title returns that title. Otherwise every title
    /// containing the query is returned. Surrounding whitespace in the query
    /// is ignored, so a blank query matches every entry.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be read
    pub fn search(&self, query: &str) -> Result<SearchResult> {
        let needle = query.trim().to_lowercase();
        let titles = self.list_entries()?;

        if let Some(title) = titles.iter().find(|t| t.to_lowercase() == needle) {
            return Ok(SearchResult::Exact(title.clone()));
        }

        let matches = titles
            .into_iter()
            .filter(|t| t.to_lowercase().contains(&needle))
            .collect();
        Ok(SearchResult::Partial(matches))
    }

    fn entry_path(&self, title: &str) -> PathBuf {
        self.root.join(format!("{}.{}", title, ENTRY_EXTENSION))
    }
}

/// Ensures title names a file directly inside the entries directory.
///
/// # Errors
///
/// Returns error if title is empty, is "." or "..", or contains a path
/// separator
fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Entry title is empty");
    }
    if title.contains('/') || title.contains('\\') {
        bail!("Entry title contains a path separator: {}", title);
    }
    if title == "." || title == ".." {
        bail!("Entry title names a directory: {}", title);
    }
    Ok(())
}
