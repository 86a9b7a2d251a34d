//! Navigation endpoints and their typed payloads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
    parser,
};

use super::util::*;

static PAYLOAD_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new("(?:Command|Endpoint)$").unwrap());

/// Container endpoint: command metadata plus exactly one sibling payload
/// key naming the concrete endpoint kind.
pub(crate) fn navigation_endpoint(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("NavigationEndpoint");
    if let Some(metadata) = data
        .get("commandMetadata")
        .and_then(|m| m.get("webCommandMetadata"))
    {
        set_string(&mut node, "url", metadata, "url");
        set_string(&mut node, "api_url", metadata, "apiUrl");
        set_string(&mut node, "page_type", metadata, "webPageType");
    }
    if let Some(obj) = data.as_object() {
        if let Some((key, body)) = obj.iter().find(|(k, _)| PAYLOAD_KEY_RE.is_match(k)) {
            node.set(
                "name",
                NodeValue::Text(parser::sanitize_class_name(key)),
            );
            node.set("payload", NodeValue::Raw(body.clone()));
        }
    }
    Ok(node)
}

pub(crate) fn browse_endpoint(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("BrowseEndpoint");
    node.set(
        "browse_id",
        NodeValue::Text(require_string(data, "browseId", "BrowseEndpoint")?),
    );
    set_string(&mut node, "params", data, "params");
    set_string(&mut node, "canonical_base_url", data, "canonicalBaseUrl");
    Ok(node)
}

pub(crate) fn watch_endpoint(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("WatchEndpoint");
    node.set(
        "video_id",
        NodeValue::Text(require_string(data, "videoId", "WatchEndpoint")?),
    );
    set_string(&mut node, "playlist_id", data, "playlistId");
    set_string(&mut node, "params", data, "params");
    set_int(&mut node, "index", data, "index");
    Ok(node)
}

pub(crate) fn search_endpoint(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("SearchEndpoint");
    node.set(
        "query",
        NodeValue::Text(require_string(data, "query", "SearchEndpoint")?),
    );
    set_string(&mut node, "params", data, "params");
    Ok(node)
}

pub(crate) fn url_endpoint(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("UrlEndpoint");
    node.set(
        "url",
        NodeValue::Text(require_string(data, "url", "UrlEndpoint")?),
    );
    set_string(&mut node, "target", data, "target");
    Ok(node)
}
