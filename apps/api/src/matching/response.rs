//! Response parsing: pulls the `{"match_score": ...}` object out of free-form model output.
//!
//! The default scan takes the FIRST non-greedy `{ ... }` span, across newlines.
//! A reply that mentions braces before the real object (e.g. `{see below}`)
//! therefore fails to parse. `first_balanced_object` is a stricter alternative
//! that is not wired into the request path.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The only value returned to callers. The [0, 95] range is requested from the
/// model but not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(deserialize_with = "lax_f64")]
    pub match_score: f64,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON object found in model reply")]
    NoJsonObject,

    #[error("invalid match JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

fn brace_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*?\}").expect("brace pattern is valid"))
}

/// Returns the first `{ ... }` span, from the first `{` to the next `}`.
pub fn first_brace_span(text: &str) -> Option<&str> {
    brace_span().find(text).map(|m| m.as_str())
}

/// Parses a raw model reply into a `MatchResult` using the first brace span.
///
/// The span is decoded to a `Value` first so a repeated key keeps its last value.
pub fn parse_match_result(raw: &str) -> Result<MatchResult, ExtractionError> {
    let span = first_brace_span(raw).ok_or(ExtractionError::NoJsonObject)?;
    let value: serde_json::Value = serde_json::from_str(span)?;
    Ok(serde_json::from_value(value)?)
}

/// Balanced-brace scan that skips braces inside JSON strings.
/// Returns the first complete top-level object.
#[allow(dead_code)]
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|s| &text[s..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Accepts a JSON number or a string holding one. Non-finite values are rejected.
fn lax_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    let score = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };

    if score.is_finite() {
        Ok(score)
    } else {
        Err(serde::de::Error::custom(format!(
            "match_score must be finite, got {score}"
        )))
    }
}
