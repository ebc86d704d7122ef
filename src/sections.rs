//! Markdown section extraction
//!
//! Every ATX heading line (`#` to `######`, whitespace, title) opens a section
//! that runs until the next heading line of any level or the end of the text.
//! Fenced code blocks are not special: a `#` line inside a fence is a heading
//! here too.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::placeholders::scan_variables;

static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?P<hashes>#{1,6})[ \t]+(?P<title>[^\r\n]*?)[ \t]*\r?$")
        .expect("heading pattern is valid")
});

const SUMMARY_LINES: usize = 3;
const SUMMARY_MAX_CHARS: usize = 150;

/// A heading and the text it governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text without the `#` prefix
    pub title: String,
    /// Number of `#` characters
    pub level: usize,
    /// The heading line as written, trailing whitespace removed
    pub heading: String,
    /// From the start of the heading line to the start of the next heading
    pub span: Range<usize>,
    /// Everything after the heading line within `span`
    pub body_span: Range<usize>,
}

impl Section {
    /// Section content with surrounding whitespace trimmed.
    pub fn body<'a>(&self, source: &'a str) -> &'a str {
        source[self.body_span.clone()].trim()
    }

    /// Variables referenced inside this section.
    pub fn variables(&self, source: &str) -> Vec<String> {
        scan_variables(self.body(source))
    }

    /// A short description built from the first lines of prose.
    ///
    /// Lists, nested headings and placeholder-only lines are skipped.
    pub fn summary(&self, source: &str) -> String {
        let text = self
            .body(source)
            .lines()
            .take(SUMMARY_LINES)
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_structural(line))
            .collect::<Vec<_>>()
            .join(" ");
        truncate(&text, SUMMARY_MAX_CHARS)
    }
}

fn is_structural(line: &str) -> bool {
    ["#", "-", "*", "1.", "["]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// Truncate to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// All sections in `text`, in document order.
pub fn extract_sections(text: &str) -> Vec<Section> {
    let headings: Vec<_> = HEADING_REGEX.captures_iter(text).collect();
    let mut sections = Vec::with_capacity(headings.len());

    for (i, caps) in headings.iter().enumerate() {
        let whole = &caps[0];
        let start = caps.get(0).map(|m| m.start()).unwrap_or_default();
        let line_end = caps.get(0).map(|m| m.end()).unwrap_or_default();
        let end = headings
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let body_start = line_end.min(end);

        sections.push(Section {
            title: caps["title"].to_string(),
            level: caps["hashes"].len(),
            heading: whole.trim_end().to_string(),
            span: start..end,
            body_span: body_start..end,
        });
    }
    sections
}

/// The first section whose heading line is exactly `heading`.
pub fn find_section<'s>(sections: &'s [Section], heading: &str) -> Option<&'s Section> {
    sections.iter().find(|s| s.heading == heading)
}

/// Text before the first heading, trimmed. Empty when the text opens with one.
pub fn preamble(text: &str) -> &str {
    match HEADING_REGEX.find(text) {
        Some(m) => text[..m.start()].trim(),
        None => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Title\n\n## Section One\nContent for one.\n\n## Section Two\nContent for two.\n\n### Subsection\nMore here.\n";

    #[test]
    fn test_extracts_all_levels() {
        let sections = extract_sections(DOC);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Title", "Section One", "Section Two", "Subsection"]);
        let levels: Vec<_> = sections.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![1, 2, 2, 3]);
    }

    #[test]
    fn test_body_stops_at_next_heading() {
        let sections = extract_sections(DOC);
        assert_eq!(sections[0].body(DOC), "");
        assert_eq!(sections[1].body(DOC), "Content for one.");
        assert_eq!(sections[2].body(DOC), "Content for two.");
        assert_eq!(sections[3].body(DOC), "More here.");
    }

    #[test]
    fn test_spans_tile_the_document() {
        let sections = extract_sections(DOC);
        assert_eq!(sections[0].span.start, 0);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].span.end, pair[1].span.start);
        }
        assert_eq!(sections.last().map(|s| s.span.end), Some(DOC.len()));
    }

    #[test]
    fn test_heading_requires_space_after_hashes() {
        assert!(extract_sections("#hashtag\n####### seven").is_empty());
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        let text = "## Your Role  \r\nBody\r\n";
        let sections = extract_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "## Your Role");
        assert_eq!(sections[0].title, "Your Role");
        assert_eq!(sections[0].body(text), "Body");
    }

    #[test]
    fn test_section_variables() {
        let text = "## Input\nProcess {{file}} from [source].\n## Output\n{{format}}";
        let sections = extract_sections(text);
        assert_eq!(sections[0].variables(text), vec!["file", "source"]);
        assert_eq!(sections[1].variables(text), vec!["format"]);
    }

    #[test]
    fn test_summary_skips_lists() {
        let text = "## Role\nYou are a reviewer.\n- bullet\nCheck every change.\nIgnored fourth line.";
        let sections = extract_sections(text);
        assert_eq!(
            sections[0].summary(text),
            "You are a reviewer. Check every change."
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn test_preamble() {
        assert_eq!(preamble("Intro line.\n\n## Your Role\nx"), "Intro line.");
        assert_eq!(preamble("## Your Role\nx"), "");
        assert_eq!(preamble("  no headings  "), "no headings");
    }
}
