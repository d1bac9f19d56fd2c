//! Defensive extraction of structured content from provider text.
//!
//! The Suggestion Service returns free text that is only expected to parse
//! as JSON with one known top-level key. Everything here tolerates markdown
//! fences, leading prose, and wrong shapes; a miss yields `None` and the
//! caller degrades to empty content.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Content produced by a provider call, marking whether the provider
/// actually delivered or the call degraded to an empty fallback.
///
/// The external contract stays "never throw"; the marker exists so call
/// sites can log degradations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated<T> {
    Full(T),
    Degraded(T),
}

impl<T> Generated<T> {
    pub fn into_inner(self) -> T {
        match self {
            Generated::Full(value) | Generated::Degraded(value) => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Generated::Degraded(_))
    }
}

impl<T: Default> Generated<T> {
    pub fn degraded() -> Generated<T> {
        Generated::Degraded(T::default())
    }
}

/// Parse provider text into a JSON object, if there is one to find.
pub fn parse_object(text: &str) -> Option<Value> {
    let cleaned = extract_json(text);
    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        if value.is_object() {
            return Some(value);
        }
    }
    first_json_object(cleaned)
}

/// Pull the named array out of a provider object, coercing each element.
///
/// `None` when the key is absent or not an array; elements that do not
/// deserialize are skipped rather than failing the batch.
pub fn typed_list<T: DeserializeOwned>(value: &Value, key: &str) -> Option<Vec<T>> {
    let items = value.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
    )
}

/// Like [`typed_list`] for arrays of plain strings.
pub fn string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    let items = value.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

/// Strip markdown code fences from provider text.
fn extract_json(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return text[start..start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let start = start + 3;
        // skip a language identifier if present
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            return text[start..start + end].trim();
        }
    }

    text
}

/// Scan for the first parseable JSON object embedded in prose.
fn first_json_object(text: &str) -> Option<Value> {
    for (idx, ch) in text.char_indices() {
        if ch != '{' {
            continue;
        }
        let mut deserializer = serde_json::Deserializer::from_str(&text[idx..]);
        if let Ok(value) = Value::deserialize(&mut deserializer) {
            if value.is_object() {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
