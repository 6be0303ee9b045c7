//! Link resolution for wiki internal references.

use anyhow::{Result, bail};

/// Route under which the wiki serves entries (`/wiki/<Title>`).
pub const DEFAULT_ROUTE_PREFIX: &str = "/wiki/";

/// Resolves wiki route links to exported entry fragments.
///
/// Transforms internal links such as `/wiki/Python` into `Python.html`, the
/// file the exporter writes for that entry. Every exported fragment lives in
/// the same directory, so resolved links are plain file names.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    route_prefix: String,
}

impl LinkResolver {
    /// Creates link resolver for the given entry route prefix.
    ///
    /// # Arguments
    ///
    /// * `route_prefix`: Path prefix that precedes entry titles in links
    pub fn new(route_prefix: impl Into<String>) -> Self {
        Self {
            route_prefix: route_prefix.into(),
        }
    }

    /// Resolves link to the exported fragment URL.
    ///
    /// Handles different link types:
    /// - Absolute URLs (http://, https://) remain unchanged
    /// - Anchor links (#section) remain unchanged
    /// - Entry routes (/wiki/Title, /wiki/Title#part) resolve to Title.html
    /// - Anything else remains unchanged
    ///
    /// # Arguments
    ///
    /// * `link`: Link href from rendered markup
    ///
    /// # Returns
    ///
    /// Resolved URL for the exported fragment set
    ///
    /// # Errors
    ///
    /// Returns error if the route names no entry or tries to leave the
    /// entry directory
    pub fn resolve(&self, link: &str) -> Result<String> {
        if link.starts_with("http://") || link.starts_with("https://") || link.starts_with('#') {
            return Ok(link.to_string());
        }

        let Some(target) = link.strip_prefix(self.route_prefix.as_str()) else {
            return Ok(link.to_string());
        };

        let (title, fragment) = match target.split_once('#') {
            Some((title, fragment)) => (title, Some(fragment)),
            None => (target, None),
        };
        let title = title.trim_end_matches('/');

        if title.is_empty() {
            bail!("Link names no entry: {}", link);
        }
        if title.contains('/') || title.contains('\\') || title == "." || title == ".." {
            bail!("Link escapes entry directory: {}", link);
        }

        Ok(match fragment {
            Some(fragment) => format!("{}.html#{}", title, fragment),
            None => format!("{}.html", title),
        })
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_PREFIX)
    }
}
