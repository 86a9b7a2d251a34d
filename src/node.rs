//! Typed node model produced by the parsers.
//!
//! Every interior object of an InnerTube response is a single-key wrapper
//! whose key names a renderer/command/endpoint class. The item parser
//! dispatches each wrapper to a registered constructor, and every
//! constructor, statically registered or synthesized at runtime, produces
//! the same uniform [`Node`] value: a type tag plus an insertion-ordered
//! list of snake_case fields. Backing runtime classes with a typed-key map
//! instead of per-class structs is what lets the registry grow at parse
//! time without codegen.
//!
//! Nodes are shared between the parsed tree and the per-section
//! [`Memo`](crate::memo::Memo), and the mutation engine patches them
//! in-place through the memo, so handles are reference counted and
//! interior mutable ([`NodeHandle`]).

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::InnertubeError;

/// Shared, interior-mutable reference to a parsed node.
///
/// The memo and the parsed tree alias the same allocations; mutation
/// passes look nodes up via the memo and write through the handle.
pub type NodeHandle = Arc<RwLock<Node>>;

/// Wrap a freshly constructed node into a shareable handle.
pub fn handle(node: Node) -> NodeHandle {
    Arc::new(RwLock::new(node))
}

/// A single typed field value.
#[derive(Debug, Clone)]
pub enum NodeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// A nested parsed node.
    Node(NodeHandle),
    /// An ordered sequence of parsed nodes.
    Array(ObservedArray),
    /// Opaque payload kept as raw JSON (plain objects, primitive lists,
    /// shapes the constructor does not model).
    Raw(Value),
}

impl NodeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            NodeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            NodeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeHandle> {
        match self {
            NodeValue::Node(n) => Some(n.clone()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ObservedArray> {
        match self {
            NodeValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            NodeValue::Raw(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for NodeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeValue::Bool(a), NodeValue::Bool(b)) => a == b,
            (NodeValue::Int(a), NodeValue::Int(b)) => a == b,
            (NodeValue::Float(a), NodeValue::Float(b)) => a == b,
            (NodeValue::Text(a), NodeValue::Text(b)) => a == b,
            (NodeValue::Node(a), NodeValue::Node(b)) => *a.read() == *b.read(),
            (NodeValue::Array(a), NodeValue::Array(b)) => a == b,
            (NodeValue::Raw(a), NodeValue::Raw(b)) => a == b,
            _ => false,
        }
    }
}

/// A parsed node: a stable type tag plus typed fields in insertion order.
///
/// The tag always equals the sanitized class name the node was dispatched
/// under. Field names are snake_case regardless of the camelCase source
/// keys.
#[derive(Debug, Clone)]
pub struct Node {
    type_tag: String,
    fields: Vec<(String, NodeValue)>,
}

impl Node {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Node {
            type_tag: type_tag.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Identity check against one or more type tags.
    pub fn is(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| *t == self.type_tag)
    }

    /// Cast-or-fail against a type tag set. Polymorphism is flat: the
    /// comparison is strict tag equality, never subtyping.
    pub fn expect_tag(&self, tags: &[&str]) -> Result<(), InnertubeError> {
        if self.is(tags) {
            Ok(())
        } else {
            Err(InnertubeError::Typecheck {
                expected: tags.iter().map(|t| t.to_string()).collect(),
                actual: self.type_tag.clone(),
            })
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&NodeValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Fetch-or-fail access for a dynamic key.
    pub fn key(&self, key: &str) -> Result<&NodeValue, InnertubeError> {
        self.get(key).ok_or_else(|| InnertubeError::MissingKey {
            tag: self.type_tag.clone(),
            key: key.to_string(),
        })
    }

    /// Insert a field, replacing any previous value under the same key
    /// while keeping its original position.
    pub fn set(&mut self, key: impl Into<String>, value: NodeValue) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(NodeValue::as_str)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(NodeValue::as_int)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(NodeValue::as_bool)
    }

    pub fn node(&self, key: &str) -> Option<NodeHandle> {
        self.get(key).and_then(NodeValue::as_node)
    }

    pub fn array(&self, key: &str) -> Option<&ObservedArray> {
        self.get(key).and_then(NodeValue::as_array)
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(NodeValue::as_raw)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &NodeValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.type_tag == other.type_tag && self.fields == other.fields
    }
}

/// Ordered sequence of parsed nodes mirroring source order.
#[derive(Debug, Clone, Default)]
pub struct ObservedArray(Vec<NodeHandle>);

impl ObservedArray {
    pub fn new() -> Self {
        ObservedArray(Vec::new())
    }

    pub(crate) fn push(&mut self, node: NodeHandle) {
        self.0.push(node);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeHandle> {
        self.0.get(index).cloned()
    }

    pub fn first(&self) -> Option<NodeHandle> {
        self.0.first().cloned()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeHandle> {
        self.0.iter()
    }

    /// All members whose tag is in the given set, preserving order.
    pub fn filter_type(&self, tags: &[&str]) -> ObservedArray {
        self.0
            .iter()
            .filter(|n| n.read().is(tags))
            .cloned()
            .collect()
    }

    /// First member whose tag is in the given set.
    pub fn first_of_type(&self, tags: &[&str]) -> Option<NodeHandle> {
        self.0.iter().find(|n| n.read().is(tags)).cloned()
    }

    /// Membership check by a node's target id field.
    pub fn contains_target_id(&self, id: &str) -> bool {
        self.0.iter().any(|n| {
            let node = n.read();
            node.string("target_id") == Some(id) || node.string("id") == Some(id)
        })
    }
}

impl FromIterator<NodeHandle> for ObservedArray {
    fn from_iter<I: IntoIterator<Item = NodeHandle>>(iter: I) -> Self {
        ObservedArray(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObservedArray {
    type Item = &'a NodeHandle;
    type IntoIter = std::slice::Iter<'a, NodeHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq for ObservedArray {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| *a.read() == *b.read())
    }
}

/// Poly-parsed result: a section parsed without a shape requirement holds
/// either a single node or an observed array, and callers branch on the
/// variant instead of duck typing.
#[derive(Debug, Clone)]
pub enum ParsedValue {
    Node(NodeHandle),
    Array(ObservedArray),
}

impl ParsedValue {
    pub fn as_node(&self) -> Option<NodeHandle> {
        match self {
            ParsedValue::Node(n) => Some(n.clone()),
            ParsedValue::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ObservedArray> {
        match self {
            ParsedValue::Array(a) => Some(a),
            ParsedValue::Node(_) => None,
        }
    }

    /// Uniform array view; a single node becomes a one-element array.
    pub fn into_array(self) -> ObservedArray {
        match self {
            ParsedValue::Array(a) => a,
            ParsedValue::Node(n) => std::iter::once(n).collect(),
        }
    }
}

impl PartialEq for ParsedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParsedValue::Node(a), ParsedValue::Node(b)) => *a.read() == *b.read(),
            (ParsedValue::Array(a), ParsedValue::Array(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut node = Node::new("Video");
        node.set("video_id", NodeValue::Text("abc".into()));
        node.set("view_count", NodeValue::Int(42));
        node
    }

    #[test]
    fn test_tag_checks() {
        let node = sample();
        assert!(node.is(&["Video"]));
        assert!(node.is(&["CompactVideo", "Video"]));
        assert!(!node.is(&["CompactVideo"]));
        assert!(node.expect_tag(&["Video"]).is_ok());
        assert!(matches!(
            node.expect_tag(&["Shelf"]),
            Err(InnertubeError::Typecheck { .. })
        ));
    }

    #[test]
    fn test_dynamic_key_access() {
        let node = sample();
        assert!(node.has_key("video_id"));
        assert_eq!(node.key("video_id").unwrap().as_str(), Some("abc"));
        assert!(matches!(
            node.key("missing"),
            Err(InnertubeError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut node = sample();
        node.set("video_id", NodeValue::Text("xyz".into()));
        assert_eq!(node.len(), 2);
        assert_eq!(node.fields().next().unwrap().0, "video_id");
        assert_eq!(node.string("video_id"), Some("xyz"));
    }

    #[test]
    fn test_observed_array_filters() {
        let mut arr = ObservedArray::new();
        arr.push(handle(sample()));
        let mut other = Node::new("Shelf");
        other.set("target_id", NodeValue::Text("shelf-1".into()));
        arr.push(handle(other));

        assert_eq!(arr.filter_type(&["Video"]).len(), 1);
        assert_eq!(
            arr.first_of_type(&["Shelf"]).unwrap().read().type_tag(),
            "Shelf"
        );
        assert!(arr.contains_target_id("shelf-1"));
        assert!(!arr.contains_target_id("shelf-2"));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample(), sample());
        let a = ParsedValue::Node(handle(sample()));
        let b = ParsedValue::Node(handle(sample()));
        assert_eq!(a, b);
    }
}
