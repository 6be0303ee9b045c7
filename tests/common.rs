//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary entry directories used across
//! multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

/// Creates temporary entries directory holding the given entries.
///
/// # Arguments
///
/// * `entries`: Pairs of entry title and Markdown content
///
/// # Errors
///
/// Returns error if directory creation or a file write fails
pub fn create_entries_dir(entries: &[(&str, &str)]) -> Result<TempDir> {
    let dir = TempDir::new()?;
    for (title, content) in entries {
        write_entry(dir.path(), title, content)?;
    }
    Ok(dir)
}

/// Writes entry `<title>.md` into the entries directory.
///
/// # Errors
///
/// Returns error if file write fails
pub fn write_entry(dir: &Path, title: &str, content: &str) -> Result<()> {
    std::fs::write(dir.join(format!("{}.md", title)), content)?;
    Ok(())
}

/// Sample entries in the style of the encyclopedia.
pub const SAMPLE_ENTRIES: &[(&str, &str)] = &[
    (
        "CSS",
        "# CSS\r\n\r\nCSS is a language used to style an [HTML](/wiki/HTML) document.\r\n",
    ),
    (
        "Git",
        "# Git\n\n\
         Git is a version control tool.\n\n\
         ## Commands\n\n\
         - `git clone`\n\
         - `git commit`\n\n\
         See [GitHub](https://github.com) and [Python](/wiki/Python).\n",
    ),
    (
        "HTML",
        "# HTML\n\nHTML is a **markup** language that *structures* pages.\n",
    ),
    (
        "Python",
        "# Python\n\n\
         Steps:\n\n\
         1. Install\n\
         2. Write code\n\
         3. Run\n",
    ),
];
