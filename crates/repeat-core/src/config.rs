//! Replacement maps, recipe keys and path patterns
//!
//! Every value arrives as JSON, either inline on the command line or as the
//! path of a file holding it. Input starting with the expected opening
//! bracket is treated as inline JSON, anything else as a path.

use std::path::Path;

use serde_json::Value;

use crate::{Error, Result};

/// Ordered literal substitutions.
///
/// Applied to text by replacing every occurrence of each key with its value,
/// one entry after the other in map order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
}

impl ReplacementMap {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Substitute every entry into `text`, in order.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (search, replace) in &self.entries {
            // An empty key would match between every character
            if !search.is_empty() {
                out = out.replace(search.as_str(), replace);
            }
        }
        out
    }

    fn from_object(object: serde_json::Map<String, Value>) -> Result<Self> {
        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            match value {
                Value::String(value) => entries.push((key, value)),
                other => {
                    return Err(Error::configuration(format!(
                        "Replacement for \"{key}\" must be a string, got {other}"
                    )));
                }
            }
        }
        Ok(Self { entries })
    }
}

/// Parse one replacement map (`{...}`) or a list of them (`[{...}, ...]`).
///
/// A list means one full replay pass per map.
pub fn parse_replacements(input: &str) -> Result<Vec<ReplacementMap>> {
    let json = inline_or_file(input, &['{', '['], "replacements")?;
    let value: Value = serde_json::from_str(&json)
        .map_err(|e| Error::configuration(format!("Replacements are not valid JSON: {e}")))?;

    match value {
        Value::Object(object) => Ok(vec![ReplacementMap::from_object(object)?]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(object) => ReplacementMap::from_object(object),
                other => Err(Error::configuration(format!(
                    "Replacement lists must hold objects, got {other}"
                ))),
            })
            .collect(),
        other => Err(Error::configuration(format!(
            "Replacements must be an object or a list of objects, got {other}"
        ))),
    }
}

/// Parse recipe keys (`["Foo", "foo"]`).
pub fn parse_keys(input: &str) -> Result<Vec<String>> {
    let json = inline_or_file(input, &['['], "keys")?;
    string_list(&json, "Keys")
}

/// Parse a list of regular expressions given inline (`["\\.md"]`).
pub fn parse_patterns(input: &str, what: &str) -> Result<Vec<String>> {
    string_list(input, what)
}

/// Union of the keys of every map, in first-seen order.
pub fn replacement_keys(maps: &[ReplacementMap]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in maps.iter().flat_map(ReplacementMap::keys) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

fn string_list(json: &str, what: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::configuration(format!("{what} are not valid JSON: {e}")))?;
    let Value::Array(items) = value else {
        return Err(Error::configuration(format!("{what} must be a JSON list")));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(Error::configuration(format!(
                "{what} must be strings, got {other}"
            ))),
        })
        .collect()
}

fn inline_or_file(input: &str, openers: &[char], what: &str) -> Result<String> {
    let trimmed = input.trim_start();
    if trimmed.starts_with(openers) {
        return Ok(trimmed.to_string());
    }
    if trimmed.is_empty() {
        return Err(Error::configuration(format!("No {what} given")));
    }

    let path = Path::new(input);
    tracing::debug!(path = %path.display(), "Reading {what} from file");
    std::fs::read_to_string(path).map_err(|e| repeat_fs::Error::io(path, e).into())
}
