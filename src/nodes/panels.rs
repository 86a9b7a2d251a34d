//! Alerts, overlays and engagement panels.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
};

use super::util::*;

pub(crate) fn alert(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Alert");
    node.set(
        "alert_type",
        NodeValue::Text(require_string(data, "type", "Alert")?),
    );
    set_text(&mut node, "text", data, "text");
    Ok(node)
}

pub(crate) fn alert_with_button(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("AlertWithButton");
    node.set(
        "alert_type",
        NodeValue::Text(require_string(data, "type", "AlertWithButton")?),
    );
    set_text(&mut node, "text", data, "text");
    set_item(&mut node, "dismiss_button", data, "dismissButton");
    Ok(node)
}

pub(crate) fn engagement_panel_section_list(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("EngagementPanelSectionList");
    set_item(&mut node, "header", data, "header");
    set_item(&mut node, "content", data, "content");
    set_string(&mut node, "panel_identifier", data, "panelIdentifier");
    set_string(&mut node, "target_id", data, "targetId");
    set_string(&mut node, "visibility", data, "visibility");
    Ok(node)
}

pub(crate) fn player_annotations_expanded(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlayerAnnotationsExpanded");
    set_bool(&mut node, "allow_swipe_dismiss", data, "allowSwipeDismiss");
    set_string(&mut node, "annotation_id", data, "annotationId");
    set_raw(&mut node, "featured_channel", data, "featuredChannel");
    Ok(node)
}

pub(crate) fn player_overlay(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlayerOverlay");
    set_item(&mut node, "end_screen", data, "endScreen");
    set_item(&mut node, "autoplay", data, "autoplay");
    set_item(&mut node, "share_button", data, "shareButton");
    set_item(&mut node, "add_to_menu", data, "addToMenu");
    Ok(node)
}

pub(crate) fn live_chat_item_context_menu(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("LiveChatItemContextMenu");
    set_items(&mut node, "items", data, "items")?;
    Ok(node)
}
