//! Runtime synthesis of node constructors for unknown classes.
//!
//! The upstream schema churns continuously; a class name the registry has
//! never seen must degrade gracefully instead of sinking the response. On
//! first sight the sample body is introspected into a [`KeyInfo`] schema,
//! a constructor interpreting that schema is registered, and a
//! `class_not_found` event carries a human-readable class sketch so the
//! gap can drive a manual registry update. Later sightings of the same
//! class are compared against the recorded schema and shape drift is
//! reported as `class_changed`.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    node::{Node, NodeValue},
    registry::{NodeConstructor, RuntimeClass, REGISTRY},
    reporter::{self, ParserEvent},
};

/// Inferred shape of one wrapper field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text,
    Number,
    Boolean,
    Unknown,
    Array,
    /// A nested single-key class wrapper.
    Wrapper,
    /// A plain object with no recognized shape.
    Object,
    /// A known non-wrapper shape (text runs, thumbnail sets, endpoints).
    Misc(&'static str),
}

impl KeyKind {
    /// Type name used in the rendered class sketch.
    fn sketch_type(&self) -> &'static str {
        match self {
            KeyKind::Text => "String",
            KeyKind::Number => "i64",
            KeyKind::Boolean => "bool",
            KeyKind::Unknown => "serde_json::Value",
            KeyKind::Array => "ObservedArray",
            KeyKind::Wrapper => "NodeHandle",
            KeyKind::Object => "serde_json::Value",
            KeyKind::Misc(name) => name,
        }
    }
}

/// One introspected field: the camelCase source key and its inferred kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRecord {
    pub key: String,
    pub kind: KeyKind,
}

/// The full introspected shape of a class body.
pub type KeyInfo = Vec<KeyRecord>;

/// A single entry of a shape diff between two sightings of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyChange {
    pub key: String,
    /// `None` when the key is new in the current sample.
    pub previous: Option<KeyKind>,
    pub current: KeyKind,
}

/// Project a camelCase source key onto the produced snake_case field name.
pub(crate) fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Infer a key schema from a sample body.
pub fn introspect(body: &Value) -> KeyInfo {
    let Some(obj) = body.as_object() else {
        return Vec::new();
    };
    obj.iter()
        .map(|(key, value)| KeyRecord {
            key: key.clone(),
            kind: classify(value),
        })
        .collect()
}

fn classify(value: &Value) -> KeyKind {
    match value {
        Value::String(_) => KeyKind::Text,
        Value::Number(_) => KeyKind::Number,
        Value::Bool(_) => KeyKind::Boolean,
        Value::Null => KeyKind::Unknown,
        Value::Array(_) => KeyKind::Array,
        Value::Object(map) => {
            if map.contains_key("runs") || map.contains_key("simpleText") {
                KeyKind::Misc("Text")
            } else if map.get("thumbnails").is_some_and(Value::is_array) {
                KeyKind::Misc("Thumbnail")
            } else if map.contains_key("commandMetadata") || map.contains_key("clickTrackingParams")
            {
                KeyKind::Misc("NavigationEndpoint")
            } else if is_wrapper_shape(value) {
                KeyKind::Wrapper
            } else {
                KeyKind::Object
            }
        }
    }
}

fn is_wrapper_shape(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.len() == 1 && map.values().next().is_some_and(Value::is_object))
}

/// Render the code-like class sketch attached to `class_not_found` events.
/// Diagnostics only, never compiled.
pub fn render_sketch(classname: &str, key_info: &KeyInfo) -> String {
    let mut out = format!("pub struct {classname} {{\n");
    for record in key_info {
        out.push_str(&format!(
            "    pub {}: {},\n",
            camel_to_snake(&record.key),
            record.kind.sketch_type()
        ));
    }
    out.push('}');
    out
}

/// Synthesize and register a constructor for a class the registry misses.
///
/// The constructor is a closure over the class name that re-reads the
/// recorded schema on every invocation, so drift updates take effect
/// without re-registration.
pub(crate) fn generate_class(classname: &str, body: &Value) -> NodeConstructor {
    let key_info = introspect(body);
    let sketch = render_sketch(classname, &key_info);
    reporter::report(ParserEvent::ClassNotFound {
        classname: classname.to_string(),
        key_info: key_info.clone(),
        sketch: sketch.clone(),
    });

    let owner = classname.to_string();
    let constructor: NodeConstructor = Arc::new(move |raw: &Value| {
        let schema = REGISTRY
            .runtime_class(&owner)
            .map(|class| class.key_info)
            .unwrap_or_default();
        Ok(interpret(&owner, &schema, raw))
    });
    REGISTRY.add_runtime_parser(
        RuntimeClass {
            classname: classname.to_string(),
            key_info,
            sketch,
        },
        constructor.clone(),
    );
    constructor
}

/// Compare a fresh sample of a runtime class against its recorded schema,
/// reporting kind changes and newly appeared keys.
///
/// Keys absent from the new sample are not treated as removed; optional
/// fields are routinely missing from individual payloads.
pub(crate) fn check_for_drift(classname: &str, body: &Value) {
    let Some(entry) = REGISTRY.runtime_class(classname) else {
        return;
    };
    let current = introspect(body);
    let changes: Vec<KeyChange> = current
        .iter()
        .filter_map(|record| {
            match entry.key_info.iter().find(|prev| prev.key == record.key) {
                Some(prev) if prev.kind == record.kind => None,
                Some(prev) => Some(KeyChange {
                    key: record.key.clone(),
                    previous: Some(prev.kind),
                    current: record.kind,
                }),
                None => Some(KeyChange {
                    key: record.key.clone(),
                    previous: None,
                    current: record.kind,
                }),
            }
        })
        .collect();
    if changes.is_empty() {
        return;
    }

    reporter::report(ParserEvent::ClassChanged {
        classname: classname.to_string(),
        changes: changes.clone(),
    });

    let mut merged = entry.key_info.clone();
    for change in &changes {
        match merged.iter_mut().find(|record| record.key == change.key) {
            Some(record) => record.kind = change.current,
            None => merged.push(KeyRecord {
                key: change.key.clone(),
                kind: change.current,
            }),
        }
    }
    let sketch = render_sketch(classname, &merged);
    REGISTRY.update_runtime_schema(classname, merged, sketch);
}

/// Interpret a key schema against a raw body, producing a node whose
/// fields mirror the recognized keys in snake_case.
fn interpret(classname: &str, schema: &KeyInfo, body: &Value) -> Node {
    let mut node = Node::new(classname);
    let Some(obj) = body.as_object() else {
        return node;
    };
    for record in schema {
        let Some(value) = obj.get(&record.key) else {
            continue;
        };
        let field = camel_to_snake(&record.key);
        match record.kind {
            KeyKind::Text => {
                if let Some(s) = value.as_str() {
                    node.set(field, NodeValue::Text(s.to_string()));
                } else {
                    node.set(field, NodeValue::Raw(value.clone()));
                }
            }
            KeyKind::Number => {
                if let Some(i) = value.as_i64() {
                    node.set(field, NodeValue::Int(i));
                } else if let Some(f) = value.as_f64() {
                    node.set(field, NodeValue::Float(f));
                } else {
                    node.set(field, NodeValue::Raw(value.clone()));
                }
            }
            KeyKind::Boolean => {
                if let Some(b) = value.as_bool() {
                    node.set(field, NodeValue::Bool(b));
                } else {
                    node.set(field, NodeValue::Raw(value.clone()));
                }
            }
            KeyKind::Array => {
                let all_wrappers = value
                    .as_array()
                    .is_some_and(|items| !items.is_empty() && items.iter().all(is_wrapper_shape));
                if all_wrappers {
                    if let Ok(items) = super::parse_array(Some(value), None) {
                        node.set(field, NodeValue::Array(items));
                    }
                } else {
                    node.set(field, NodeValue::Raw(value.clone()));
                }
            }
            KeyKind::Wrapper => {
                if let Some(child) = super::parse_item(Some(value), None) {
                    node.set(field, NodeValue::Node(child));
                }
            }
            KeyKind::Misc("Text") => {
                if let Some(text) = crate::nodes::util::text_of(value) {
                    node.set(field, NodeValue::Text(text));
                } else {
                    node.set(field, NodeValue::Raw(value.clone()));
                }
            }
            KeyKind::Misc("NavigationEndpoint") => {
                if let Some(endpoint) = super::construct_known("NavigationEndpoint", value) {
                    node.set(field, NodeValue::Node(endpoint));
                } else {
                    node.set(field, NodeValue::Raw(value.clone()));
                }
            }
            KeyKind::Unknown | KeyKind::Object | KeyKind::Misc(_) => {
                node.set(field, NodeValue::Raw(value.clone()));
            }
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("videoId"), "video_id");
        assert_eq!(camel_to_snake("longBylineText"), "long_byline_text");
        assert_eq!(camel_to_snake("url"), "url");
    }

    #[test]
    fn test_classify_shapes() {
        assert_eq!(classify(&json!("x")), KeyKind::Text);
        assert_eq!(classify(&json!(3)), KeyKind::Number);
        assert_eq!(classify(&json!(true)), KeyKind::Boolean);
        assert_eq!(classify(&json!(null)), KeyKind::Unknown);
        assert_eq!(classify(&json!([1, 2])), KeyKind::Array);
        assert_eq!(
            classify(&json!({ "runs": [{ "text": "hi" }] })),
            KeyKind::Misc("Text")
        );
        assert_eq!(
            classify(&json!({ "thumbnails": [{ "url": "u" }] })),
            KeyKind::Misc("Thumbnail")
        );
        assert_eq!(
            classify(&json!({ "clickTrackingParams": "x", "browseEndpoint": {} })),
            KeyKind::Misc("NavigationEndpoint")
        );
        assert_eq!(
            classify(&json!({ "videoRenderer": { "videoId": "a" } })),
            KeyKind::Wrapper
        );
        assert_eq!(classify(&json!({ "a": 1, "b": 2 })), KeyKind::Object);
    }

    #[test]
    fn test_render_sketch() {
        let key_info = vec![
            KeyRecord {
                key: "videoId".into(),
                kind: KeyKind::Text,
            },
            KeyRecord {
                key: "badges".into(),
                kind: KeyKind::Array,
            },
        ];
        let sketch = render_sketch("MysteryCard", &key_info);
        assert!(sketch.contains("pub struct MysteryCard"));
        assert!(sketch.contains("pub video_id: String"));
        assert!(sketch.contains("pub badges: ObservedArray"));
    }
}
