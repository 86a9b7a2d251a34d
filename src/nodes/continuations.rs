//! Continuation nodes: the shape discriminators callers hand back to the
//! transport to fetch the next page of a list.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
    parser,
};

use super::util::*;

pub(crate) fn timed_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("TimedContinuation");
    node.set(
        "continuation",
        NodeValue::Text(require_string(data, "continuation", "TimedContinuation")?),
    );
    set_int(&mut node, "timeout_ms", data, "timeoutMs");
    Ok(node)
}

pub(crate) fn item_section_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("ItemSectionContinuation");
    set_items(&mut node, "contents", data, "contents")?;
    set_string(&mut node, "target_id", data, "targetId");
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn section_list_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("SectionListContinuation");
    set_items(&mut node, "contents", data, "contents")?;
    set_string(&mut node, "target_id", data, "targetId");
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn live_chat_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("LiveChatContinuation");
    // Chat actions are command-shaped; unknown ones drop silently instead
    // of spawning stub classes for every experiment upstream runs.
    let actions = parser::parse_commands(data.get("actions"));
    if !actions.is_empty() {
        node.set("actions", NodeValue::Array(actions));
    }
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn music_playlist_shelf_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MusicPlaylistShelfContinuation");
    set_items(&mut node, "contents", data, "contents")?;
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn music_shelf_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MusicShelfContinuation");
    set_items(&mut node, "contents", data, "contents")?;
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn grid_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("GridContinuation");
    set_items(&mut node, "items", data, "items")?;
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn playlist_panel_continuation(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlaylistPanelContinuation");
    set_items(&mut node, "contents", data, "contents")?;
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn continuation_command(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("ContinuationCommand");
    node.set(
        "token",
        NodeValue::Text(require_string(data, "token", "ContinuationCommand")?),
    );
    set_string(&mut node, "request", data, "request");
    Ok(node)
}

pub(crate) fn continuation_item(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("ContinuationItem");
    set_string(&mut node, "trigger", data, "trigger");
    set_endpoint(&mut node, "endpoint", data, "continuationEndpoint");
    Ok(node)
}
