//! Locates the JSON object a page assigns to `_initialData` and parses it.
//!
//! The parsed tree is a plain `serde_json::Value`. Navigation goes through the
//! helpers below, which turn every missing or mistyped step into an explicit
//! `None` or `ScrapeError` instead of panicking.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ScrapeError;

/// Parsed form of an embedded page blob.
pub type AttributeTree = Value;

static INITIAL_DATA_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_initialData\s*=\s*").expect("anchor pattern is valid"));

/// Extract and parse the object literal assigned to `_initialData`.
///
/// The literal is delimited by a balanced-brace scan that skips over string
/// contents, so a `};` inside a string value does not end it early.
pub fn extract_initial_data(html: &str) -> Result<AttributeTree, ScrapeError> {
    let rest = INITIAL_DATA_ANCHOR
        .find_iter(html)
        .map(|anchor| &html[anchor.end()..])
        .find(|rest| rest.starts_with('{'))
        .ok_or_else(|| {
            ScrapeError::NotFound("_initialData object assignment".to_string())
        })?;

    let end = object_literal_len(rest).ok_or_else(|| {
        ScrapeError::MalformedData("unterminated _initialData object".to_string())
    })?;

    Ok(serde_json::from_str(&rest[..end])?)
}

/// Byte length of the object literal at the start of `src`, including both
/// braces. `None` when the braces never balance.
fn object_literal_len(src: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in src.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Step into `key`, requiring the value there to be an object.
pub fn object_at<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Step into `key`, requiring the value there to be an array.
pub fn array_at<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    map.get(key).and_then(Value::as_array)
}

/// String value at `key`, or an empty string when absent or not a string.
pub fn string_or_empty(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Follow `path` from the root, failing with `SchemaMismatch` on the first
/// step that is missing or not an object.
pub fn require_path<'a>(
    root: &'a AttributeTree,
    path: &[&str],
) -> Result<&'a Map<String, Value>, ScrapeError> {
    let mut current = root
        .as_object()
        .ok_or_else(|| ScrapeError::SchemaMismatch("<root object>".to_string()))?;
    for key in path {
        current =
            object_at(current, key).ok_or_else(|| ScrapeError::SchemaMismatch((*key).to_string()))?;
    }
    Ok(current)
}
