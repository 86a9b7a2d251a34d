//! End-to-end parses through the public API.

use innertube_core::{
    parser::{parse_array, parse_command, response::parse_response},
    registry::REGISTRY,
    InnertubeError,
};
use serde_json::json;

#[test]
fn test_browse_like_document() {
    let raw = json!({
        "contents": [
            { "videoRenderer": {
                "videoId": "dQw4w9WgXcQ",
                "title": { "runs": [{ "text": "Never Gonna Give You Up" }] },
                "viewCountText": { "simpleText": "1B views" },
                "navigationEndpoint": {
                    "commandMetadata": { "webCommandMetadata": { "url": "/watch?v=dQw4w9WgXcQ" } },
                    "watchEndpoint": { "videoId": "dQw4w9WgXcQ" }
                }
            } },
            { "adSlotRenderer": { "adSlotMetadata": {} } },
            { "shelfRenderer": {
                "title": { "simpleText": "Trending" },
                "content": { "verticalListRenderer": { "items": [
                    { "videoRenderer": { "videoId": "second" } }
                ] } }
            } }
        ],
        "estimatedResults": "230000",
        "refinements": ["music"]
    });

    let response = parse_response(&raw).unwrap();
    let contents = response.contents.as_ref().unwrap().as_array().unwrap();
    // Ad slot dropped, video and shelf survive.
    assert_eq!(contents.len(), 2);

    let memo = response.contents_memo.as_ref().unwrap();
    // Videos at any depth land in the memo.
    assert_eq!(memo.get_type(&["Video"]).len(), 2);
    assert_eq!(memo.get_type(&["Shelf", "VerticalList"]).len(), 2);

    let video = memo.get_type(&["Video"]).first().unwrap();
    assert_eq!(video.read().string("video_id"), Some("dQw4w9WgXcQ"));
    let endpoint = video.read().node("endpoint").unwrap();
    assert_eq!(endpoint.read().type_tag(), "WatchEndpoint");

    assert_eq!(response.estimated_results, Some(230000));
    assert_eq!(response.refinements.as_deref(), Some(&["music".to_string()][..]));
}

#[test]
fn test_watch_next_style_nesting() {
    let raw = json!({
        "watchNextResponse": {
            "contents": [
                { "musicRadioShelfRenderer": { "title": { "simpleText": "Mixes" } } }
            ]
        }
    });
    let response = parse_response(&raw).unwrap();
    assert!(response.contents.is_none());

    let nested = response.watch_next_response.unwrap();
    let mixes = nested.contents_memo.as_ref().unwrap().get_type(&["MusicMixShelf"]);
    assert_eq!(mixes.len(), 1);
}

#[test]
fn test_array_shape_violation_surfaces() {
    let single = json!({ "videoRenderer": { "videoId": "a" } });
    match parse_array(Some(&single), None) {
        Err(InnertubeError::ExpectedArray { classname }) => assert_eq!(classname, "Video"),
        other => panic!("expected shape error, got {other:?}"),
    }
}

#[test]
fn test_explicit_registry_lookup_contract() {
    assert!(REGISTRY.get_or_err("SectionList").is_ok());
    assert!(matches!(
        REGISTRY.get_or_err("DefinitelyNotAClass"),
        Err(InnertubeError::ModuleNotFound(_))
    ));
}

#[test]
fn test_command_dispatch_over_containers() {
    let endpoint = json!({
        "clickTrackingParams": "x",
        "watchEndpoint": { "videoId": "abc", "playlistId": "PL1" }
    });
    let node = parse_command(Some(&endpoint)).unwrap();
    let node = node.read();
    assert_eq!(node.type_tag(), "WatchEndpoint");
    assert_eq!(node.string("video_id"), Some("abc"));
    assert_eq!(node.string("playlist_id"), Some("PL1"));
}
