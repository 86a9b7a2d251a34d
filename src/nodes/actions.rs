//! Response-received actions and commands.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
    parser,
};

use super::util::*;

pub(crate) fn navigate_action(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("NavigateAction");
    set_endpoint(&mut node, "endpoint", data, "endpoint");
    Ok(node)
}

pub(crate) fn show_miniplayer_command(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("ShowMiniplayerCommand");
    set_string(&mut node, "video_id", data, "videoId");
    set_endpoint(&mut node, "miniplayer_command", data, "miniplayerCommand");
    Ok(node)
}

pub(crate) fn reload_continuation_items_command(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("ReloadContinuationItemsCommand");
    set_string(&mut node, "target_id", data, "targetId");
    set_string(&mut node, "slot", data, "slot");
    set_items(&mut node, "contents", data, "continuationItems")?;
    Ok(node)
}

pub(crate) fn append_continuation_items_action(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("AppendContinuationItemsAction");
    set_string(&mut node, "target_id", data, "targetId");
    set_items(&mut node, "contents", data, "continuationItems")?;
    Ok(node)
}

pub(crate) fn open_popup(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("OpenPopupAction");
    set_string(&mut node, "popup_type", data, "popupType");
    if let Some(popup) = parser::parse_item(data.get("popup"), None) {
        node.set("popup", NodeValue::Node(popup));
    }
    Ok(node)
}
