//! Layout containers: section lists, grids, tabs and column results.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
    parser,
};

use super::util::*;

pub(crate) fn section_list(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("SectionList");
    set_items(&mut node, "contents", data, "contents")?;
    set_item(&mut node, "header", data, "header");
    set_string(&mut node, "target_id", data, "targetId");
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn item_section(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("ItemSection");
    set_items(&mut node, "contents", data, "contents")?;
    set_item(&mut node, "header", data, "header");
    set_string(&mut node, "target_id", data, "targetId");
    set_string(&mut node, "section_identifier", data, "sectionIdentifier");
    Ok(node)
}

pub(crate) fn vertical_list(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("VerticalList");
    set_items(&mut node, "items", data, "items")?;
    set_int(&mut node, "collapsed_item_count", data, "collapsedItemCount");
    Ok(node)
}

pub(crate) fn horizontal_list(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("HorizontalList");
    set_items(&mut node, "items", data, "items")?;
    set_int(&mut node, "visible_item_count", data, "visibleItemCount");
    Ok(node)
}

pub(crate) fn grid(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Grid");
    set_items(&mut node, "items", data, "items")?;
    set_string(&mut node, "target_id", data, "targetId");
    set_bool(&mut node, "is_collapsible", data, "isCollapsible");
    Ok(node)
}

pub(crate) fn two_column_browse_results(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("TwoColumnBrowseResults");
    set_items(&mut node, "tabs", data, "tabs")?;
    set_item(&mut node, "secondary_contents", data, "secondaryContents");
    Ok(node)
}

pub(crate) fn two_column_watch_next_results(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("TwoColumnWatchNextResults");
    // Both columns sit two levels deep in same-named envelopes.
    if let Some(results) = data
        .get("results")
        .and_then(|r| r.get("results"))
        .and_then(|r| r.get("contents"))
    {
        node.set(
            "results",
            NodeValue::Array(parser::parse_array(Some(results), None)?),
        );
    }
    if let Some(secondary) = data
        .get("secondaryResults")
        .and_then(|r| r.get("secondaryResults"))
        .and_then(|r| r.get("results"))
    {
        node.set(
            "secondary_results",
            NodeValue::Array(parser::parse_array(Some(secondary), None)?),
        );
    }
    Ok(node)
}

pub(crate) fn tab(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Tab");
    set_string(&mut node, "title", data, "title");
    set_bool(&mut node, "selected", data, "selected");
    set_item(&mut node, "content", data, "content");
    set_endpoint(&mut node, "endpoint", data, "endpoint");
    Ok(node)
}

pub(crate) fn playlist_video_list(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlaylistVideoList");
    set_items(&mut node, "contents", data, "contents")?;
    set_string(&mut node, "playlist_id", data, "playlistId");
    set_bool(&mut node, "can_reorder", data, "canReorder");
    set_string(&mut node, "target_id", data, "targetId");
    Ok(node)
}
