//! Validator settings.

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

/// Headings every generated prompt must contain, in reporting order.
pub const DEFAULT_REQUIRED_SECTIONS: [&str; 3] =
    ["## Your Role", "## Input", "## Output Requirements"];

/// Minimum trimmed length of a required section's content before it is flagged.
pub const DEFAULT_MIN_SECTION_LENGTH: usize = 50;

/// Minimum word count of the whole document before it is flagged.
pub const DEFAULT_MIN_DOCUMENT_WORDS: usize = 50;

/// Rules applied by [`Validator`](super::Validator).
///
/// Required sections are full heading lines (`## Your Role`), matched exactly
/// and case sensitively against whole lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub required_sections: Vec<String>,
    /// Characters; `0` disables the check
    pub min_section_length: usize,
    /// Words; `0` disables the check
    pub min_document_words: usize,
    /// Advise when role, input and output sections lack the usual phrasing
    pub section_guidance: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_sections: DEFAULT_REQUIRED_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_section_length: DEFAULT_MIN_SECTION_LENGTH,
            min_document_words: DEFAULT_MIN_DOCUMENT_WORDS,
            section_guidance: true,
        }
    }
}

impl ValidationConfig {
    pub fn with_required_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_section_length(mut self, chars: usize) -> Self {
        self.min_section_length = chars;
        self
    }

    pub fn with_min_document_words(mut self, words: usize) -> Self {
        self.min_document_words = words;
        self
    }

    pub fn with_section_guidance(mut self, enabled: bool) -> Self {
        self.section_guidance = enabled;
        self
    }

    /// Reject settings that could never match a document line.
    pub fn check(&self) -> Result<(), ForgeError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.required_sections.len());
        for heading in &self.required_sections {
            check_heading(heading)?;
            if seen.contains(&heading.as_str()) {
                return Err(ForgeError::section(heading, "listed more than once"));
            }
            seen.push(heading);
        }
        Ok(())
    }
}

fn check_heading(heading: &str) -> Result<(), ForgeError> {
    if heading.trim().is_empty() {
        return Err(ForgeError::section(heading, "heading is empty"));
    }
    if heading.contains(['\n', '\r']) {
        return Err(ForgeError::section(heading, "heading spans more than one line"));
    }
    if heading != heading.trim() {
        return Err(ForgeError::section(
            heading,
            "heading has leading or trailing whitespace",
        ));
    }

    let hashes = heading.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return Err(ForgeError::section(
            heading,
            "heading must start with one to six '#' characters",
        ));
    }
    let rest = &heading[hashes..];
    if !rest.starts_with([' ', '\t']) || rest.trim().is_empty() {
        return Err(ForgeError::section(
            heading,
            "heading needs a space and a label after the '#' prefix",
        ));
    }
    Ok(())
}
