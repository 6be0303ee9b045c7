//! Markdown rendering for the wiki dialect.

use anyhow::{Context, Result};
use std::path::Path;

use super::{LinkResolver, Pass};

/// Renders wiki Markdown to HTML fragments.
///
/// Supports level one to three headings, inline links, bold, italic,
/// unordered and ordered lists, and paragraphs. Output is a fragment with one
/// block per line; there is no document wrapper. Raw HTML in the input is
/// passed through unescaped, and unmatched markers stay literal. Optionally
/// resolves wiki route links to exported fragment files when configured with
/// LinkResolver.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    link_resolver: Option<LinkResolver>,
}

impl MarkdownRenderer {
    /// Creates renderer without link resolution.
    pub fn new() -> Self {
        Self {
            link_resolver: None,
        }
    }

    /// Creates renderer that rewrites entry routes to fragment files.
    ///
    /// Links such as `/wiki/Title` become `Title.html`. Absolute URLs and
    /// anchor links remain unchanged.
    pub fn with_link_resolver(resolver: LinkResolver) -> Self {
        Self {
            link_resolver: Some(resolver),
        }
    }

    /// Renders markdown content to HTML string.
    ///
    /// Runs every pass of [`Pass::PIPELINE`] in order, rewrites links if a
    /// resolver is configured, then drops blank lines. Empty input yields an
    /// empty string.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML fragment
    pub fn render(&self, content: &str) -> String {
        let mut html = Pass::PIPELINE
            .iter()
            .fold(content.to_string(), |text, pass| pass.apply(&text));

        if let Some(resolver) = &self.link_resolver {
            html = Self::rewrite_links(&html, resolver);
        }

        html.lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rewrites anchor targets through the link resolver.
    ///
    /// Finds all `<a ... href="...">` tags and resolves their targets.
    /// Targets the resolver rejects are kept as written.
    ///
    /// # Arguments
    ///
    /// * `html`: Rendered HTML
    /// * `resolver`: Link resolver for target transformation
    ///
    /// # Returns
    ///
    /// HTML with rewritten link targets
    fn rewrite_links(html: &str, resolver: &LinkResolver) -> String {
        const ATTR: &str = "href=\"";

        let mut result = String::with_capacity(html.len());
        let mut pos = 0;

        while let Some(offset) = html[pos..].find("<a ") {
            let tag_start = pos + offset;
            result.push_str(&html[pos..tag_start]);

            // Only look for the attribute inside this tag
            let tag_end = html[tag_start..]
                .find('>')
                .map_or(html.len(), |p| tag_start + p);

            let attr_start = match html[tag_start..tag_end].find(ATTR) {
                Some(p) => tag_start + p + ATTR.len(),
                None => {
                    result.push_str(&html[tag_start..tag_start + 1]);
                    pos = tag_start + 1;
                    continue;
                }
            };

            let attr_end = match html[attr_start..].find('"') {
                Some(p) => attr_start + p,
                None => {
                    result.push_str(&html[tag_start..attr_start]);
                    pos = attr_start;
                    continue;
                }
            };

            let url = &html[attr_start..attr_end];
            let resolved = resolver
                .resolve(url)
                .unwrap_or_else(|_| url.to_string());

            result.push_str(&html[tag_start..attr_start]);
            result.push_str(&resolved);

            pos = attr_end;
        }

        result.push_str(&html[pos..]);
        result
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or is not valid UTF8
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        Ok(self.render(&content))
    }
}

/// Renders wiki Markdown with a default renderer.
pub fn markdown_to_html(content: &str) -> String {
    MarkdownRenderer::new().render(content)
}
