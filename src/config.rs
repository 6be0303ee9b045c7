//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command line configuration for wikimark.
#[derive(Debug, Clone, Parser)]
#[command(name = "wikimark", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Operations offered by the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render a Markdown file, or standard input, to an HTML fragment
    Render {
        /// Markdown file to render
        file: Option<PathBuf>,
    },

    /// Render every entry to <OUTPUT>/<Title>.html
    Export {
        /// Entries directory
        #[arg(default_value = "entries")]
        entries: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Rewrite /wiki/<Title> links to exported fragment files
        #[arg(long)]
        resolve_links: bool,
    },

    /// List entry titles
    List {
        /// Entries directory
        #[arg(default_value = "entries")]
        entries: PathBuf,
    },

    /// Search entry titles, ignoring case
    Search {
        /// Text to look for
        query: String,

        /// Entries directory
        #[arg(long, default_value = "entries")]
        entries: PathBuf,
    },
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file or entries directory does not exist.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Render { file: Some(file) } if !file.is_file() => {
                bail!("Markdown file does not exist: {}", file.display());
            }
            Command::Render { .. } => {}
            Command::Export { entries, .. }
            | Command::List { entries }
            | Command::Search { entries, .. } => ensure_entries_dir(entries)?,
        }

        Ok(())
    }
}

fn ensure_entries_dir(entries: &Path) -> Result<()> {
    if !entries.is_dir() {
        bail!("Entries directory does not exist: {}", entries.display());
    }
    Ok(())
}
