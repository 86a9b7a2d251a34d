//! Shelf renderers, including the music variants.

use serde_json::Value;

use crate::{error::InnertubeError, node::Node};

use super::util::*;

pub(crate) fn shelf(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("Shelf");
    set_text(&mut node, "title", data, "title");
    set_text(&mut node, "subtitle", data, "subtitle");
    set_item(&mut node, "content", data, "content");
    set_endpoint(&mut node, "endpoint", data, "endpoint");
    Ok(node)
}

pub(crate) fn music_shelf(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MusicShelf");
    set_text(&mut node, "title", data, "title");
    set_items(&mut node, "contents", data, "contents")?;
    set_continuation(&mut node, data);
    Ok(node)
}

/// Sanitized from `musicRadioShelfRenderer`; upstream still says radio,
/// the product says mix.
pub(crate) fn music_mix_shelf(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MusicMixShelf");
    set_text(&mut node, "title", data, "title");
    set_items(&mut node, "contents", data, "contents")?;
    set_raw(&mut node, "thumbnail", data, "thumbnail");
    Ok(node)
}

pub(crate) fn music_playlist_shelf(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MusicPlaylistShelf");
    set_string(&mut node, "playlist_id", data, "playlistId");
    set_items(&mut node, "contents", data, "contents")?;
    set_int(&mut node, "collapsed_item_count", data, "collapsedItemCount");
    set_continuation(&mut node, data);
    Ok(node)
}

pub(crate) fn playlist_panel(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("PlaylistPanel");
    set_string(&mut node, "title", data, "title");
    set_items(&mut node, "contents", data, "contents")?;
    set_string(&mut node, "playlist_id", data, "playlistId");
    set_bool(&mut node, "is_infinite", data, "isInfinite");
    set_continuation(&mut node, data);
    Ok(node)
}
