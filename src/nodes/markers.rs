//! Marker list entities.
//!
//! Heat-map markers never appear in the renderer tree; the mutation
//! engine constructs these nodes straight from
//! `macroMarkersListEntity` mutation payloads and appends them to the
//! section memo.

use serde_json::Value;

use crate::{error::InnertubeError, node::Node};

use super::util::*;

pub(crate) fn macro_markers_list_entity(data: &Value) -> Result<Node, InnertubeError> {
    let mut node = Node::new("MacroMarkersListEntity");
    set_string(&mut node, "key", data, "key");
    set_string(&mut node, "external_video_id", data, "externalVideoId");
    if let Some(list) = data.get("markersList") {
        set_string(&mut node, "marker_type", list, "markerType");
        set_raw(&mut node, "markers", list, "markers");
    }
    Ok(node)
}
