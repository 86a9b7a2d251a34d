//! Odds and ends: messages, player error screens, video details.

use serde_json::Value;

use crate::{
    error::InnertubeError,
    node::{Node, NodeValue},
};

use super::util::*;

pub(crate) fn message(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Message");
    let text = data
        .get("text")
        .and_then(text_of)
        .ok_or_else(|| InnertubeError::missing_field("Message", "text"))?;
    node.set("text", NodeValue::Text(text));
    Ok(node)
}

pub(crate) fn player_error_message(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlayerErrorMessage");
    set_text(&mut node, "reason", data, "reason");
    set_text(&mut node, "subreason", data, "subreason");
    set_item(&mut node, "proceed_button", data, "proceedButton");
    set_raw(&mut node, "thumbnail", data, "thumbnail");
    Ok(node)
}

/// Player-side video details. Not a renderer wrapper: the response parser
/// invokes this constructor directly on the plain `videoDetails` object.
pub(crate) fn video_details(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("VideoDetails");
    node.set(
        "video_id",
        NodeValue::Text(require_string(data, "videoId", "VideoDetails")?),
    );
    set_string(&mut node, "title", data, "title");
    set_string(&mut node, "author", data, "author");
    set_string(&mut node, "channel_id", data, "channelId");
    set_int(&mut node, "length_seconds", data, "lengthSeconds");
    set_int(&mut node, "view_count", data, "viewCount");
    set_string(&mut node, "short_description", data, "shortDescription");
    set_raw(&mut node, "keywords", data, "keywords");
    set_raw(&mut node, "thumbnail", data, "thumbnail");
    set_bool(&mut node, "is_live_content", data, "isLiveContent");
    set_bool(&mut node, "is_owner_viewing", data, "isOwnerViewing");
    set_bool(&mut node, "is_private", data, "isPrivate");
    set_bool(&mut node, "allow_ratings", data, "allowRatings");
    Ok(node)
}
