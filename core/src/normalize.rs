//! Turns backend error payloads into one human-readable sentence.
//!
//! The backend answers failures in several shapes: a bare string,
//! `{"detail": "..."}`, `{"detail": [{"loc": [...], "msg": "..."}]}` from
//! request validation, `{"detail": {"message": "..."}}` or `{"message": "..."}`.
//! [`api_error_message`] flattens all of them and [`prettify`] cleans each
//! message up for display.
//!
//! Breed detection is heuristic text matching against the phrasing the
//! backend is known to use. Treat it as best-effort.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const INVALID_BREED: &str = "Invalid breed. Please use a valid breed name.";

static BODY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^body\.").unwrap());
static ENUM_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)enum").unwrap());
// The name may be quoted; it stops at a quote or a period so the templated
// output below is itself left untouched on a second pass.
static NAMED_BREED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)invalid breed[:\s]*'?([^'".\s][^'".]*)'?"#).unwrap());
static VALUE_ERROR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)value error[:,]?\s*").unwrap());
static BREED_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^breed[:\s-]*").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean up a single backend message for display.
pub fn prettify(raw: &str) -> String {
    let msg = raw.trim();
    let msg = BODY_PREFIX.replace(msg, "");
    let msg = msg.replace('_', " ");

    if ENUM_MENTION.is_match(&msg) {
        return INVALID_BREED.to_string();
    }
    if let Some(caps) = NAMED_BREED.captures(&msg) {
        let breed = caps[1].trim();
        return format!("Invalid breed: {breed}. Please use a valid breed name.");
    }

    let msg = VALUE_ERROR.replace(&msg, "");
    let msg = BREED_LABEL.replace(&msg, "Invalid breed. ");
    let msg = WHITESPACE.replace_all(&msg, " ");

    capitalize(msg.trim())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Flatten a backend error payload into one display string.
///
/// `None` and JSON `null` mean the failure carried no payload at all.
pub fn api_error_message(payload: Option<&Value>) -> String {
    let data = match payload {
        None | Some(Value::Null) => return UNKNOWN_ERROR.to_string(),
        Some(data) => data,
    };

    if let Value::String(s) = data {
        return prettify(s);
    }

    if let Some(detail) = data.get("detail").filter(|d| is_truthy(d)) {
        match detail {
            Value::String(s) => return prettify(s),
            Value::Array(entries) => {
                return entries
                    .iter()
                    .map(detail_entry_message)
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ");
            }
            Value::Object(_) => {
                if let Some(message) = non_empty_str(detail.get("message")) {
                    return prettify(message);
                }
            }
            _ => {}
        }
    }

    if let Some(message) = non_empty_str(data.get("message")) {
        return prettify(message);
    }

    match serde_json::to_string(data) {
        Ok(text) => prettify(&text),
        Err(_) => UNKNOWN_ERROR.to_string(),
    }
}

/// One entry of a validation error list: `{"loc": [...], "msg": "..."}`.
fn detail_entry_message(entry: &Value) -> String {
    let location = entry
        .get("loc")
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();

    let raw = non_empty_str(entry.get("msg"))
        .or_else(|| non_empty_str(entry.get("message")))
        .unwrap_or("");

    if location.is_empty() {
        prettify(raw)
    } else {
        prettify(&format!("{location}: {raw}"))
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
