//! Shared projection helpers for node constructors.
//!
//! Raw renderer bodies repeat a handful of shapes everywhere: text as
//! either `simpleText` or `runs`, thumbnail sets, continuation token
//! containers, numbers serialized as strings. Constructors go through
//! these helpers so every class projects them the same way.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
    parser,
};

/// Flatten a text object (`simpleText` or concatenated `runs`).
pub(crate) fn text_of(value: &Value) -> Option<String> {
    if let Some(simple) = value.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_string());
    }
    let runs = value.get("runs")?.as_array()?;
    Some(
        runs.iter()
            .filter_map(|run| run.get("text").and_then(Value::as_str))
            .collect(),
    )
}

pub(crate) fn string_of(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Integer field tolerant of numeric-string serialization.
pub(crate) fn int_of(data: &Value, key: &str) -> Option<i64> {
    match data.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn require_string(data: &Value, key: &str, tag: &str) -> Result<String, InnertubeError> {
    string_of(data, key).ok_or_else(|| InnertubeError::missing_field(tag, key))
}

/// Pull a continuation token out of either a bare `continuation` string or
/// a `continuations` wrapper list.
pub(crate) fn continuation_token(data: &Value) -> Option<String> {
    if let Some(token) = data.get("continuation").and_then(Value::as_str) {
        return Some(token.to_string());
    }
    let continuations = data.get("continuations")?.as_array()?;
    continuations.iter().find_map(|entry| {
        let (_, body) = entry.as_object()?.iter().next()?;
        body.get("continuation")
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

pub(crate) fn set_string(node: &mut Node, field: &str, data: &Value, key: &str) {
    if let Some(s) = string_of(data, key) {
        node.set(field, NodeValue::Text(s));
    }
}

pub(crate) fn set_text(node: &mut Node, field: &str, data: &Value, key: &str) {
    if let Some(text) = data.get(key).and_then(text_of) {
        node.set(field, NodeValue::Text(text));
    }
}

pub(crate) fn set_int(node: &mut Node, field: &str, data: &Value, key: &str) {
    if let Some(i) = int_of(data, key) {
        node.set(field, NodeValue::Int(i));
    }
}

pub(crate) fn set_bool(node: &mut Node, field: &str, data: &Value, key: &str) {
    if let Some(b) = data.get(key).and_then(Value::as_bool) {
        node.set(field, NodeValue::Bool(b));
    }
}

pub(crate) fn set_raw(node: &mut Node, field: &str, data: &Value, key: &str) {
    if let Some(value) = data.get(key) {
        node.set(field, NodeValue::Raw(value.clone()));
    }
}

/// Parse a nested wrapper field through the item parser.
pub(crate) fn set_item(node: &mut Node, field: &str, data: &Value, key: &str) {
    if let Some(child) = parser::parse_item(data.get(key), None) {
        node.set(field, NodeValue::Node(child));
    }
}

/// Parse a nested wrapper-list field, propagating shape mismatches so the
/// enclosing constructor fails as one parse event.
pub(crate) fn set_items(
    node: &mut Node,
    field: &str,
    data: &Value,
    key: &str,
) -> Result<(), InnertubeError> {
    if data.get(key).is_some() {
        let items = parser::parse_array(data.get(key), None)?;
        node.set(field, NodeValue::Array(items));
    }
    Ok(())
}

/// Parse a command/endpoint container field.
pub(crate) fn set_endpoint(node: &mut Node, field: &str, data: &Value, key: &str) {
    if let Some(endpoint) = parser::parse_command(data.get(key)) {
        node.set(field, NodeValue::Node(endpoint));
    }
}

pub(crate) fn set_continuation(node: &mut Node, data: &Value) {
    if let Some(token) = continuation_token(data) {
        node.set("continuation", NodeValue::Text(token));
    }
}
