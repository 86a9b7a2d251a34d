//! Comment threads and views.
//!
//! A comment view carries only entity keys at parse time; its content,
//! author and toolbar state arrive as entity mutations that the mutation
//! engine correlates back through those keys after structural parsing.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeHandle, NodeValue},
    parser,
};

use super::util::*;

pub(crate) fn comment_thread(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("CommentThread");
    if let Some(comment) = parser::parse_item(data.get("commentViewModel"), None)
        .or_else(|| parser::parse_item(data.get("comment"), None))
    {
        node.set("comment", NodeValue::Node(comment));
    }
    set_item(&mut node, "replies", data, "replies");
    set_string(&mut node, "rendering_priority", data, "renderingPriority");
    Ok(node)
}

pub(crate) fn comment_view(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("CommentView");
    node.set(
        "comment_id",
        NodeValue::Text(require_string(data, "commentId", "CommentView")?),
    );
    set_string(&mut node, "comment_key", data, "commentKey");
    set_string(&mut node, "toolbar_state_key", data, "toolbarStateKey");
    set_string(&mut node, "toolbar_surface_key", data, "toolbarSurfaceKey");
    set_string(&mut node, "surface_key", data, "commentSurfaceKey");
    Ok(node)
}

/// Patch a parsed comment view from its four correlated entity payloads.
/// Any payload may be absent; present ones are projected in place.
pub(crate) fn apply_comment_mutations(
    view: &NodeHandle,
    comment: Option<&Value>,
    toolbar_state: Option<&Value>,
    toolbar_surface: Option<&Value>,
    surface: Option<&Value>,
) {
    let mut node = view.write();
    if let Some(payload) = comment {
        if let Some(content) = payload
            .get("properties")
            .and_then(|p| p.get("content"))
            .and_then(|c| c.get("content"))
            .and_then(Value::as_str)
        {
            node.set("content", NodeValue::Text(content.to_string()));
        }
        if let Some(published) = payload
            .get("properties")
            .and_then(|p| p.get("publishedTime"))
            .and_then(Value::as_str)
        {
            node.set("published_time", NodeValue::Text(published.to_string()));
        }
        if let Some(author) = payload.get("author") {
            if let Some(name) = author.get("displayName").and_then(Value::as_str) {
                node.set("author", NodeValue::Text(name.to_string()));
            }
            if let Some(channel_id) = author.get("channelId").and_then(Value::as_str) {
                node.set("author_id", NodeValue::Text(channel_id.to_string()));
            }
        }
        node.set("comment", NodeValue::Raw(payload.clone()));
    }
    if let Some(payload) = toolbar_state {
        if let Some(heart_state) = payload.get("heartState").and_then(Value::as_str) {
            node.set("heart_state", NodeValue::Text(heart_state.to_string()));
        }
        node.set("toolbar_state", NodeValue::Raw(payload.clone()));
    }
    if let Some(payload) = toolbar_surface {
        node.set("toolbar_surface", NodeValue::Raw(payload.clone()));
    }
    if let Some(payload) = surface {
        node.set("comment_surface", NodeValue::Raw(payload.clone()));
    }
}
