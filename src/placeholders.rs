//! Placeholder scanning
//!
//! Two placeholder syntaxes are recognized in a single pass:
//!
//! ```text
//! {{ name }}   double brace, inner whitespace trimmed from the name
//! [name]       single bracket, no inner whitespace
//! ```
//!
//! Names follow the identifier grammar `[A-Za-z_][A-Za-z0-9_]*` and are case
//! sensitive. Anything else (an unclosed brace, `{{first-name}}`, `[two words]`)
//! is plain text. Scanning never fails.
//!
//! The same name in either syntax is one logical variable, so
//! `Hi {{name}}, your [name] is set` needs exactly one input: `name`.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// Combined pattern for both syntaxes. Group `brace` or `bracket` holds the name.
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\{\{[ \t]*(?P<brace>[A-Za-z_][A-Za-z0-9_]*)[ \t]*\}\}|\[(?P<bracket>[A-Za-z_][A-Za-z0-9_]*)\]",
    )
    .expect("placeholder pattern is valid")
});

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Which delimiters a placeholder was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderSyntax {
    /// `{{name}}`
    DoubleBrace,
    /// `[name]`
    SingleBracket,
}

/// One placeholder occurrence in a body of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub name: String,
    pub syntax: PlaceholderSyntax,
    /// Byte range of the whole placeholder, delimiters included
    pub span: Range<usize>,
}

impl Placeholder {
    /// The placeholder exactly as written in `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

/// Every placeholder occurrence in `body`, in document order.
pub fn scan_placeholders(body: &str) -> Vec<Placeholder> {
    PLACEHOLDER_REGEX
        .captures_iter(body)
        .map(|caps| {
            let (name, syntax) = name_of(&caps);
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            Placeholder {
                name: name.to_string(),
                syntax,
                span: whole,
            }
        })
        .collect()
}

/// Distinct variable names referenced in `body`, in first-occurrence order.
pub fn scan_variables(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(body) {
        let (name, _) = name_of(&caps);
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Whether `name` is a legal placeholder identifier.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

pub(crate) fn placeholder_regex() -> &'static Regex {
    &PLACEHOLDER_REGEX
}

pub(crate) fn name_of<'h>(caps: &Captures<'h>) -> (&'h str, PlaceholderSyntax) {
    match caps.name("brace") {
        Some(m) => (m.as_str(), PlaceholderSyntax::DoubleBrace),
        None => (
            caps.name("bracket").map(|m| m.as_str()).unwrap_or_default(),
            PlaceholderSyntax::SingleBracket,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_syntaxes_one_variable() {
        assert_eq!(scan_variables("Hi {{name}}, your [name] is set"), vec!["name"]);
    }

    #[test]
    fn test_first_occurrence_order() {
        let body = "[b] {{a}} {{b}} [c] {{a}}";
        assert_eq!(scan_variables(body), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_inner_whitespace_trimmed() {
        assert_eq!(scan_variables("{{  padded\t}}"), vec!["padded"]);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(scan_variables("{{Name}} {{name}}"), vec!["Name", "name"]);
    }

    #[test]
    fn test_malformed_forms_are_text() {
        let body = "{{unclosed and {{first-name}} and [two words] and {{9lives}} and [ spaced ]";
        assert!(scan_variables(body).is_empty());
    }

    #[test]
    fn test_empty_body() {
        assert!(scan_variables("").is_empty());
        assert!(scan_placeholders("").is_empty());
    }

    #[test]
    fn test_positions_and_syntax() {
        let body = "A {{ x }} and [y].";
        let found = scan_placeholders(body);
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].name, "x");
        assert_eq!(found[0].syntax, PlaceholderSyntax::DoubleBrace);
        assert_eq!(found[0].span, 2..9);
        assert_eq!(found[0].text(body), "{{ x }}");

        assert_eq!(found[1].name, "y");
        assert_eq!(found[1].syntax, PlaceholderSyntax::SingleBracket);
        assert_eq!(found[1].text(body), "[y]");
    }

    #[test]
    fn test_occurrences_not_deduplicated() {
        assert_eq!(scan_placeholders("{{a}}{{a}}[a]").len(), 3);
    }

    #[test]
    fn test_identifier_grammar() {
        assert!(is_identifier("_private"));
        assert!(is_identifier("var2"));
        assert!(!is_identifier("2var"));
        assert!(!is_identifier("first-name"));
        assert!(!is_identifier(""));
    }
}
