//! Ordered text passes of the wiki Markdown dialect.
//!
//! Each pass takes the whole document and returns a new one. Later passes
//! rely on the markup emitted by earlier ones, so the order in
//! [`Pass::PIPELINE`] is part of the dialect: headings, links, bold, italic,
//! list items, list wrapping, paragraphs.

use maud::{Markup, PreEscaped, html};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link regex"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic regex"));
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\. (.+)$").expect("valid ordered item regex"));

/// Placeholder tags marking list items until their run is wrapped.
const UNORDERED_OPEN: &str = "<uli>";
const UNORDERED_CLOSE: &str = "</uli>";
const ORDERED_OPEN: &str = "<oli>";
const ORDERED_CLOSE: &str = "</oli>";

/// Tags that mark a line as already structured, so it is never wrapped in
/// a paragraph.
const BLOCK_TAGS: &[&str] = &["ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6", "p"];

/// One step of the rendering pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// `#`, `##`, `###` followed by a space.
    Headings,
    /// `[text](url)` anywhere in a line.
    Links,
    /// `**text**`.
    Bold,
    /// `*text*`, after bold has consumed its pairs.
    Italic,
    /// Lines starting with `* `, `+ ` or `- `.
    UnorderedItems,
    /// Lines starting with `<digits>. `.
    OrderedItems,
    /// Groups contiguous items into `<ul>`/`<ol>` and emits `<li>`.
    ListWrapping,
    /// Wraps every remaining unstructured line in `<p>`.
    Paragraphs,
}

impl Pass {
    /// Every pass in application order.
    pub const PIPELINE: [Pass; 8] = [
        Pass::Headings,
        Pass::Links,
        Pass::Bold,
        Pass::Italic,
        Pass::UnorderedItems,
        Pass::OrderedItems,
        Pass::ListWrapping,
        Pass::Paragraphs,
    ];

    /// Applies this pass to `text`, returning the transformed document.
    ///
    /// Lines are split on `\n` (a trailing `\r` is dropped) and rejoined
    /// with `\n`. Input that the pass does not recognize is copied through
    /// unchanged.
    pub fn apply(self, text: &str) -> String {
        match self {
            Pass::Headings => map_lines(text, heading),
            Pass::Links => map_inline(text, |body| {
                LINK_RE.replace_all(body, |caps: &Captures| link(caps)).into_owned()
            }),
            Pass::Bold => map_inline(text, |body| {
                BOLD_RE
                    .replace_all(body, |caps: &Captures| {
                        html! { strong { (PreEscaped(&caps[1])) } }.into_string()
                    })
                    .into_owned()
            }),
            Pass::Italic => map_inline(text, |body| {
                ITALIC_RE
                    .replace_all(body, |caps: &Captures| {
                        html! { em { (PreEscaped(&caps[1])) } }.into_string()
                    })
                    .into_owned()
            }),
            Pass::UnorderedItems => map_lines(text, unordered_item),
            Pass::OrderedItems => map_lines(text, ordered_item),
            Pass::ListWrapping => wrap_lists(text),
            Pass::Paragraphs => map_lines(text, paragraph),
        }
    }
}

fn map_lines(text: &str, transform: impl Fn(&str) -> String) -> String {
    text.lines().map(transform).collect::<Vec<_>>().join("\n")
}

/// Applies an inline transform to each line, leaving a leading list bullet
/// out of reach so `* item` is never read as an emphasis opener.
fn map_inline(text: &str, transform: impl Fn(&str) -> String) -> String {
    map_lines(text, |line| {
        let (bullet, body) = split_bullet(line);
        format!("{bullet}{}", transform(body))
    })
}

/// Splits `* `, `+ ` or `- ` off the start of a line.
fn split_bullet(line: &str) -> (&str, &str) {
    match line.as_bytes() {
        [b'*' | b'+' | b'-', b' ', ..] => line.split_at(2),
        _ => ("", line),
    }
}

fn heading(line: &str) -> String {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    let Some(text) = line[level..].strip_prefix(' ') else {
        return line.to_string();
    };
    let text = PreEscaped(text.trim_end());

    let markup: Markup = match level {
        1 => html! { h1 { (text) } },
        2 => html! { h2 { (text) } },
        3 => html! { h3 { (text) } },
        _ => return line.to_string(),
    };
    markup.into_string()
}

fn link(caps: &Captures) -> String {
    html! { a href=(PreEscaped(&caps[2])) { (PreEscaped(&caps[1])) } }.into_string()
}

fn unordered_item(line: &str) -> String {
    match split_bullet(line) {
        (bullet, body) if !bullet.is_empty() && !body.is_empty() => {
            format!("{UNORDERED_OPEN}{body}{UNORDERED_CLOSE}")
        }
        _ => line.to_string(),
    }
}

fn ordered_item(line: &str) -> String {
    match ORDERED_ITEM_RE.captures(line) {
        Some(caps) => format!("{ORDERED_OPEN}{}{ORDERED_CLOSE}", &caps[1]),
        None => line.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Contiguous items of one list kind awaiting their enclosing tag.
struct ListRun<'a> {
    kind: ListKind,
    items: Vec<&'a str>,
}

impl ListRun<'_> {
    fn render(&self) -> String {
        let items = &self.items;
        let markup = match self.kind {
            ListKind::Unordered => html! { ul { @for item in items { li { (PreEscaped(item)) } } } },
            ListKind::Ordered => html! { ol { @for item in items { li { (PreEscaped(item)) } } } },
        };
        markup.into_string()
    }
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(body) = line
        .strip_prefix(UNORDERED_OPEN)
        .and_then(|rest| rest.strip_suffix(UNORDERED_CLOSE))
    {
        return Some((ListKind::Unordered, body));
    }
    line.strip_prefix(ORDERED_OPEN)
        .and_then(|rest| rest.strip_suffix(ORDERED_CLOSE))
        .map(|body| (ListKind::Ordered, body))
}

fn wrap_lists(text: &str) -> String {
    let mut lines = Vec::new();
    let mut run: Option<ListRun<'_>> = None;

    for line in text.lines() {
        let Some((kind, body)) = list_item(line) else {
            if let Some(finished) = run.take() {
                lines.push(finished.render());
            }
            lines.push(line.to_string());
            continue;
        };

        if let Some(current) = run.as_mut()
            && current.kind == kind
        {
            current.items.push(body);
            continue;
        }

        if let Some(finished) = run.replace(ListRun {
            kind,
            items: vec![body],
        }) {
            lines.push(finished.render());
        }
    }

    if let Some(finished) = run {
        lines.push(finished.render());
    }

    lines.join("\n")
}

fn paragraph(line: &str) -> String {
    let text = line.trim();
    if text.is_empty() || starts_with_block_tag(text) {
        return line.to_string();
    }
    html! { p { (PreEscaped(text)) } }.into_string()
}

fn starts_with_block_tag(line: &str) -> bool {
    let Some(tag) = line.strip_prefix('<') else {
        return false;
    };
    let tag = tag.strip_prefix('/').unwrap_or(tag);

    BLOCK_TAGS.iter().any(|name| {
        tag.strip_prefix(name)
            .is_some_and(|after| after.starts_with(['>', ' ', '/']))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_levels() {
        // Arrange
        let text = "# One\n## Two\n### Three";

        // Act
        let html = Pass::Headings.apply(text);

        // Assert
        assert_eq!(html, "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>");
    }

    #[test]
    fn test_headings_ignore_deeper_levels() {
        // Arrange & Act
        let html = Pass::Headings.apply("#### Four");

        // Assert
        assert_eq!(html, "#### Four", "Level four is not part of the dialect");
    }

    #[test]
    fn test_headings_require_space() {
        // Arrange & Act
        let html = Pass::Headings.apply("#hashtag");

        // Assert
        assert_eq!(html, "#hashtag");
    }

    #[test]
    fn test_links_non_greedy() {
        // Arrange
        let text = "[a](/wiki/A) and [b](/wiki/B)";

        // Act
        let html = Pass::Links.apply(text);

        // Assert
        assert_eq!(
            html,
            "<a href=\"/wiki/A\">a</a> and <a href=\"/wiki/B\">b</a>"
        );
    }

    #[test]
    fn test_links_unmatched_bracket_stays_literal() {
        // Arrange & Act
        let html = Pass::Links.apply("[not a link");

        // Assert
        assert_eq!(html, "[not a link");
    }

    #[test]
    fn test_bold_before_italic() {
        // Arrange
        let text = "**strong** then *soft*";

        // Act
        let html = Pass::Italic.apply(&Pass::Bold.apply(text));

        // Assert
        assert_eq!(html, "<strong>strong</strong> then <em>soft</em>");
    }

    #[test]
    fn test_italic_leaves_unclosed_marker() {
        // Arrange & Act
        let html = Pass::Italic.apply("**unclosed");

        // Assert
        assert_eq!(html, "**unclosed");
    }

    #[test]
    fn test_inline_passes_skip_bullet() {
        // Arrange & Act
        let html = Pass::Italic.apply("* item with *stress*");

        // Assert
        assert_eq!(html, "* item with <em>stress</em>");
    }

    #[test]
    fn test_unordered_items_all_bullets() {
        // Arrange
        let text = "* star\n+ plus\n- dash";

        // Act
        let html = Pass::UnorderedItems.apply(text);

        // Assert
        assert_eq!(html, "<uli>star</uli>\n<uli>plus</uli>\n<uli>dash</uli>");
    }

    #[test]
    fn test_unordered_items_need_content() {
        // Arrange & Act
        let html = Pass::UnorderedItems.apply("* \n-no space");

        // Assert
        assert_eq!(html, "* \n-no space");
    }

    #[test]
    fn test_ordered_items() {
        // Arrange & Act
        let html = Pass::OrderedItems.apply("1. first\n12. twelfth\n3.missing");

        // Assert
        assert_eq!(html, "<oli>first</oli>\n<oli>twelfth</oli>\n3.missing");
    }

    #[test]
    fn test_list_wrapping_groups_runs() {
        // Arrange
        let text = "<uli>a</uli>\n<uli>b</uli>\n<oli>c</oli>";

        // Act
        let html = Pass::ListWrapping.apply(text);

        // Assert
        assert_eq!(
            html,
            "<ul><li>a</li><li>b</li></ul>\n<ol><li>c</li></ol>"
        );
    }

    #[test]
    fn test_list_wrapping_blank_line_ends_run() {
        // Arrange
        let text = "<uli>a</uli>\n\n<uli>b</uli>";

        // Act
        let html = Pass::ListWrapping.apply(text);

        // Assert
        assert_eq!(html, "<ul><li>a</li></ul>\n\n<ul><li>b</li></ul>");
    }

    #[test]
    fn test_paragraphs_skip_structured_lines() {
        // Arrange
        let text = "<h1>T</h1>\n<ul><li>x</li></ul>\n<p>done</p>\nplain";

        // Act
        let html = Pass::Paragraphs.apply(text);

        // Assert
        assert_eq!(
            html,
            "<h1>T</h1>\n<ul><li>x</li></ul>\n<p>done</p>\n<p>plain</p>"
        );
    }

    #[test]
    fn test_paragraphs_wrap_inline_leading_tags() {
        // Arrange & Act
        let html = Pass::Paragraphs.apply("<strong>b</strong> text");

        // Assert
        assert_eq!(html, "<p><strong>b</strong> text</p>");
    }

    #[test]
    fn test_block_tag_detection() {
        // Arrange, Act & Assert
        assert!(starts_with_block_tag("<p>x</p>"));
        assert!(starts_with_block_tag("</ul>"));
        assert!(starts_with_block_tag("<h2 id=\"a\">"));
        assert!(!starts_with_block_tag("<pre>"));
        assert!(!starts_with_block_tag("<em>x</em>"));
        assert!(!starts_with_block_tag("plain"));
    }

    #[test]
    fn test_pipeline_order() {
        // Arrange
        let pipeline = Pass::PIPELINE;

        // Act
        let bold = pipeline.iter().position(|p| *p == Pass::Bold);
        let italic = pipeline.iter().position(|p| *p == Pass::Italic);

        // Assert
        assert_eq!(pipeline[0], Pass::Headings);
        assert_eq!(pipeline[7], Pass::Paragraphs);
        assert!(bold < italic, "Bold must consume ** before italic runs");
    }
}
