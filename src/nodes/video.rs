//! Video item renderers.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
};

use super::util::*;

pub(crate) fn video(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Video");
    node.set(
        "video_id",
        NodeValue::Text(require_string(data, "videoId", "Video")?),
    );
    set_text(&mut node, "title", data, "title");
    set_raw(&mut node, "thumbnail", data, "thumbnail");
    set_text(&mut node, "published_time", data, "publishedTimeText");
    set_text(&mut node, "view_count", data, "viewCountText");
    set_text(&mut node, "short_view_count", data, "shortViewCountText");
    set_text(&mut node, "length", data, "lengthText");
    set_text(&mut node, "author", data, "longBylineText");
    set_text(&mut node, "description_snippet", data, "descriptionSnippet");
    set_endpoint(&mut node, "endpoint", data, "navigationEndpoint");
    set_items(&mut node, "badges", data, "badges")?;
    set_item(&mut node, "menu", data, "menu");
    Ok(node)
}

pub(crate) fn compact_video(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("CompactVideo");
    node.set(
        "video_id",
        NodeValue::Text(require_string(data, "videoId", "CompactVideo")?),
    );
    set_text(&mut node, "title", data, "title");
    set_raw(&mut node, "thumbnail", data, "thumbnail");
    set_text(&mut node, "view_count", data, "viewCountText");
    set_text(&mut node, "length", data, "lengthText");
    set_text(&mut node, "author", data, "longBylineText");
    set_endpoint(&mut node, "endpoint", data, "navigationEndpoint");
    Ok(node)
}

pub(crate) fn grid_video(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("GridVideo");
    node.set(
        "video_id",
        NodeValue::Text(require_string(data, "videoId", "GridVideo")?),
    );
    set_text(&mut node, "title", data, "title");
    set_raw(&mut node, "thumbnail", data, "thumbnail");
    set_text(&mut node, "published_time", data, "publishedTimeText");
    set_endpoint(&mut node, "endpoint", data, "navigationEndpoint");
    Ok(node)
}

pub(crate) fn playlist_video(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlaylistVideo");
    node.set(
        "video_id",
        NodeValue::Text(require_string(data, "videoId", "PlaylistVideo")?),
    );
    set_text(&mut node, "title", data, "title");
    set_text(&mut node, "index", data, "index");
    set_bool(&mut node, "is_playable", data, "isPlayable");
    set_text(&mut node, "length", data, "lengthText");
    set_endpoint(&mut node, "endpoint", data, "navigationEndpoint");
    Ok(node)
}

pub(crate) fn playlist_panel_video(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlaylistPanelVideo");
    node.set(
        "video_id",
        NodeValue::Text(require_string(data, "videoId", "PlaylistPanelVideo")?),
    );
    set_text(&mut node, "title", data, "title");
    set_bool(&mut node, "selected", data, "selected");
    set_raw(&mut node, "thumbnail", data, "thumbnail");
    set_endpoint(&mut node, "endpoint", data, "navigationEndpoint");
    Ok(node)
}
