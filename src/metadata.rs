//! Front-matter parsing
//!
//! A template may open with a metadata block delimited by `---` marker lines:
//!
//! ```text
//! ---
//! name: Story Writer
//! roles: developer, qa
//! workflow_phase: development
//! ---
//! ## Your Role
//! ...
//! ```
//!
//! The block is read line by line. Each `key: value` line splits on its first
//! colon, so values may contain colons, brackets or `@` and keep their source
//! text exactly (`version: 1.10` stays `1.10`). Dash items under an empty key
//! and whole `[a, b]` values become [`MetadataValue::List`]. Keys listed in
//! [`LIST_KEYS`] are always lists, so `roles: developer, qa`,
//! `roles: [developer, qa]` and a dash list all yield the same value.
//!
//! Blocks the line reader cannot follow (indented continuations, block
//! scalars, nested maps) are handed to YAML instead.
//!
//! Parsing never fails. A missing, unterminated or unreadable block means "no
//! metadata" and the whole input is returned as the body.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_yaml::Value;

/// Marker line opening and closing the metadata block.
pub const METADATA_MARKER: &str = "---";

/// Maximum number of lines searched for the closing marker.
pub const METADATA_SCAN_LIMIT: usize = 200;

/// Keys whose values are always normalized into lists.
pub const LIST_KEYS: &[&str] = &["roles", "tags", "categories", "variables"];

/// A `key: value` line. The key starts at column 0; the value, if any, follows
/// the first colon after whitespace.
static FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<key>[A-Za-z_][A-Za-z0-9_.-]*)[ \t]*:(?:[ \t]+(?P<value>.*))?$")
        .expect("field pattern is valid")
});

/// A single front-matter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    List(Vec<String>),
}

impl MetadataValue {
    /// The scalar form. Lists yield their first item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s.as_str()),
            MetadataValue::List(items) => items.first().map(|s| s.as_str()),
        }
    }

    /// The list form. Scalars are a one-item list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            MetadataValue::Text(s) => vec![s.as_str()],
            MetadataValue::List(items) => items.iter().map(|s| s.as_str()).collect(),
        }
    }
}

/// Parsed front-matter, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, MetadataValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetadataValue::as_text)
    }

    pub fn list(&self, key: &str) -> Vec<&str> {
        self.get(key).map(MetadataValue::as_list).unwrap_or_default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Split `raw` into front-matter and body.
///
/// Returns an empty [`Metadata`] and the untouched input whenever the block is
/// absent or cannot be read.
pub fn parse_metadata(raw: &str) -> (Metadata, String) {
    match split_front_matter(raw) {
        Some((block, body)) => match parse_block(block) {
            Some(metadata) => (metadata, body.to_string()),
            None => (Metadata::new(), raw.to_string()),
        },
        None => (Metadata::new(), raw.to_string()),
    }
}

/// Locate the block between the opening and closing markers.
///
/// Returns `(block, body)` as slices of `raw`. The closing marker line and its
/// line break belong to neither.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let mut lines = raw.split_inclusive('\n');
    let first = lines.next()?;
    if !is_marker(first) {
        return None;
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines.take(METADATA_SCAN_LIMIT) {
        if is_marker(line) {
            let block = &raw[block_start..offset];
            let body = &raw[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }

    tracing::debug!(
        scan_limit = METADATA_SCAN_LIMIT,
        "front-matter marker is not closed, treating input as body"
    );
    None
}

fn is_marker(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']).trim_end() == METADATA_MARKER
}

fn parse_block(block: &str) -> Option<Metadata> {
    if block.trim().is_empty() {
        return Some(Metadata::new());
    }
    if let Some(metadata) = parse_lines(block) {
        return Some(metadata);
    }
    tracing::trace!("front-matter is not plain key: value lines, trying YAML");
    parse_yaml(block)
}

/// A field as written, before list normalization.
enum RawField {
    Scalar(String),
    Items(Vec<String>),
}

/// Read `key: value` lines and dash items. `None` when some line has neither
/// shape.
fn parse_lines(block: &str) -> Option<Metadata> {
    let mut fields: Vec<(String, RawField)> = Vec::new();
    for line in block.lines() {
        let line = line.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = dash_item(trimmed) {
            let (_, field) = fields.last_mut()?;
            let opens_list = matches!(field, RawField::Scalar(value) if value.is_empty());
            match field {
                RawField::Items(items) => items.push(item),
                RawField::Scalar(_) if opens_list => *field = RawField::Items(vec![item]),
                RawField::Scalar(_) => return None,
            }
            continue;
        }

        let caps = FIELD_REGEX.captures(line)?;
        let value = caps.name("value").map(|m| m.as_str().trim()).unwrap_or_default();
        fields.push((caps["key"].to_string(), RawField::Scalar(value.to_string())));
    }

    let mut metadata = Metadata::new();
    for (key, field) in fields {
        let value = match field {
            RawField::Items(items) => MetadataValue::List(
                items.into_iter().filter(|item| !item.is_empty()).collect(),
            ),
            RawField::Scalar(value) => line_value(&key, &value),
        };
        metadata.insert(key, value);
    }
    Some(metadata)
}

fn dash_item(line: &str) -> Option<String> {
    if line == "-" {
        return Some(String::new());
    }
    line.strip_prefix("- ").map(|item| unquote(item.trim()).to_string())
}

fn line_value(key: &str, value: &str) -> MetadataValue {
    match flow_items(value) {
        Some(items) => MetadataValue::List(items),
        None if LIST_KEYS.contains(&key) => MetadataValue::List(split_list(unquote(value))),
        None => MetadataValue::Text(unquote(value).to_string()),
    }
}

/// Items of a whole `[a, b]` value. `[draft] review` is not one.
fn flow_items(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains(['[', ']']) {
        return None;
    }
    Some(
        inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_yaml(block: &str) -> Option<Metadata> {
    let value: Value = match serde_yaml::from_str(block) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "front-matter is not valid YAML, ignoring it");
            return None;
        }
    };

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Some(Metadata::new()),
        other => {
            tracing::debug!(kind = ?other, "front-matter is not a mapping, ignoring it");
            return None;
        }
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            tracing::trace!("skipping front-matter entry with non-scalar key");
            continue;
        };
        let value = if LIST_KEYS.contains(&key.as_str()) {
            to_list(&value).map(MetadataValue::List)
        } else {
            to_value(&value)
        };
        match value {
            Some(value) => metadata.insert(key, value),
            None => tracing::trace!(key = %key, "skipping nested front-matter value"),
        }
    }
    Some(metadata)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn to_value(value: &Value) -> Option<MetadataValue> {
    match value {
        Value::Sequence(_) => to_list(value).map(MetadataValue::List),
        other => scalar_to_string(other).map(MetadataValue::Text),
    }
}

/// Normalize into a list: sequences item by item, scalars split on commas.
fn to_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Sequence(items) => Some(
            items
                .iter()
                .filter_map(scalar_to_string)
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::Null => Some(Vec::new()),
        other => scalar_to_string(other).map(|s| split_list(&s)),
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|item| item.trim().trim_start_matches('-').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
