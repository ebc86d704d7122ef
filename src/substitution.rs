//! Substitution engine
//!
//! Replaces placeholders with values from a [`GenerationContext`] in a single
//! pass. Placeholders without a value are copied byte for byte so the validator
//! can still find them. Output is never rescanned, so a value that itself looks
//! like a placeholder stays as literal text.

use std::collections::BTreeMap;

use regex::Captures;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ForgeError;
use crate::placeholders::{is_identifier, name_of, placeholder_regex};

/// Variable values supplied by the caller, keyed by variable name.
///
/// Keys that no placeholder references are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationContext {
    values: BTreeMap<String, String>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value. Returns the previous value for `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Set a value, rejecting names that can never match a placeholder.
    pub fn try_insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, ForgeError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ForgeError::InvalidVariableName(name));
        }
        Ok(self.insert(name, value))
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The subset of `variables` that has no value here, order preserved.
    pub fn missing_from(&self, variables: &[String]) -> Vec<String> {
        variables
            .iter()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect()
    }

    /// Merge `other` into `self`; values from `other` win.
    pub fn extend(&mut self, other: GenerationContext) {
        self.values.extend(other.values);
    }

    /// Read a context from a JSON object.
    ///
    /// Strings are taken as-is, numbers and booleans use their JSON text, and
    /// `null` becomes an empty string. Nested arrays and objects are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, ForgeError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ForgeError::InvalidContext(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(ForgeError::InvalidContext(
                "expected a JSON object of variable values".to_string(),
            ));
        };

        let mut context = Self::new();
        for (name, value) in map {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ForgeError::InvalidContext(format!(
                        "value for {:?} must be a scalar",
                        name
                    )))
                }
            };
            context.insert(name, text);
        }
        Ok(context)
    }
}

impl<K, V> FromIterator<(K, V)> for GenerationContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (k, v) in iter {
            context.insert(k, v);
        }
        context
    }
}

/// Replace every placeholder whose name has a value in `context`.
pub fn substitute(body: &str, context: &GenerationContext) -> String {
    if context.is_empty() {
        return body.to_string();
    }

    placeholder_regex()
        .replace_all(body, |caps: &Captures<'_>| {
            let (name, _) = name_of(caps);
            match context.get(name) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
