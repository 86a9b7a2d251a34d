//! Menus, buttons and menu items.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
};

use super::util::*;

pub(crate) fn menu(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Menu");
    set_items(&mut node, "items", data, "items")?;
    set_items(&mut node, "top_level_buttons", data, "topLevelButtons")?;
    set_text(&mut node, "label", data, "accessibilityLabel");
    Ok(node)
}

pub(crate) fn menu_service_item(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MenuServiceItem");
    set_text(&mut node, "text", data, "text");
    if let Some(icon_type) = data
        .get("icon")
        .and_then(|icon| icon.get("iconType"))
        .and_then(Value::as_str)
    {
        node.set("icon_type", NodeValue::Text(icon_type.to_string()));
    }
    set_endpoint(&mut node, "endpoint", data, "serviceEndpoint");
    Ok(node)
}

pub(crate) fn button(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Button");
    set_text(&mut node, "text", data, "text");
    set_string(&mut node, "style", data, "style");
    set_bool(&mut node, "is_disabled", data, "isDisabled");
    if let Some(icon_type) = data
        .get("icon")
        .and_then(|icon| icon.get("iconType"))
        .and_then(Value::as_str)
    {
        node.set("icon_type", NodeValue::Text(icon_type.to_string()));
    }
    set_endpoint(&mut node, "endpoint", data, "navigationEndpoint");
    set_endpoint(&mut node, "service_endpoint", data, "serviceEndpoint");
    Ok(node)
}

pub(crate) fn toggle_button(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("ToggleButton");
    set_bool(&mut node, "is_toggled", data, "isToggled");
    set_bool(&mut node, "is_disabled", data, "isDisabled");
    set_text(&mut node, "default_text", data, "defaultText");
    set_text(&mut node, "toggled_text", data, "toggledText");
    set_endpoint(&mut node, "endpoint", data, "defaultServiceEndpoint");
    set_endpoint(&mut node, "toggled_endpoint", data, "toggledServiceEndpoint");
    Ok(node)
}

/// Music filter menu entry whose `selected` state arrives out-of-band via
/// an entity mutation keyed by `form_item_entity_key`.
pub(crate) fn music_multi_select_menu_item(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MusicMultiSelectMenuItem");
    node.set(
        "form_item_entity_key",
        NodeValue::Text(require_string(
            data,
            "formItemEntityKey",
            "MusicMultiSelectMenuItem",
        )?),
    );
    set_text(&mut node, "title", data, "title");
    Ok(node)
}
