//! Recover a JSON value from free-form model output.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    // `[`, one or more `{...}` objects, `]`. Greedy and spans lines, so with
    // several arrays the match runs from the first `[{` to the last `}]`.
    static ref JSON_ARRAY_RE: Regex =
        Regex::new(r"(\[\s*\{[\s\S]*\}\s*\])").expect("static regex");
}

/// Which step of [`extract_json`] produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractPath {
    EmbeddedArray,
    WholeText,
}

/// Best-effort JSON recovery.
///
/// 1. Parse the first array-of-objects-shaped substring.
/// 2. Otherwise parse the whole text. A bare `null` counts as no result.
/// 3. Otherwise `None`; the caller falls back to the raw text.
///
/// Malformed JSON is never repaired.
pub fn extract_json(s: &str) -> Option<Value> {
    extract_json_with_path(s).map(|(value, _)| value)
}

pub fn extract_json_with_path(s: &str) -> Option<(Value, ExtractPath)> {
    if let Some(m) = JSON_ARRAY_RE.captures(s).and_then(|c| c.get(1)) {
        if let Ok(v) = serde_json::from_str::<Value>(m.as_str()) {
            return Some((v, ExtractPath::EmbeddedArray));
        }
    }

    serde_json::from_str::<Value>(s)
        .ok()
        .filter(|v| !v.is_null())
        .map(|v| (v, ExtractPath::WholeText))
}
