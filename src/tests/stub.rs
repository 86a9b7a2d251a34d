//! Stub generator lifecycle: synthesis on first sight, drift detection on
//! later sightings.

use serde_json::json;

use crate::{
    memo::MemoScope,
    parser::{self, stub::KeyKind},
    registry::REGISTRY,
    reporter::ParserEvent,
    tests::helpers::EventCapture,
};

#[test]
fn test_first_sight_synthesizes_and_registers() {
    let capture = EventCapture::install();
    assert!(!REGISTRY.has("ZorblatCard"));

    let raw = json!({ "zorblatCardRenderer": {
        "videoTitle": "hello",
        "rankingScore": 4,
        "enabled": true
    } });
    let node = parser::parse_item(Some(&raw), None).unwrap();

    let node = node.read();
    assert_eq!(node.type_tag(), "ZorblatCard");
    assert_eq!(node.string("video_title"), Some("hello"));
    assert_eq!(node.int("ranking_score"), Some(4));
    assert_eq!(node.flag("enabled"), Some(true));

    assert!(REGISTRY.has("ZorblatCard"));
    let runtime = REGISTRY.runtime_class("ZorblatCard").unwrap();
    assert!(runtime.sketch.contains("pub struct ZorblatCard"));
    assert!(runtime.sketch.contains("pub video_title: String"));

    let events = capture.of_category("class_not_found");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].classname(), "ZorblatCard");
}

#[test]
fn test_second_sight_with_same_shape_is_quiet() {
    let raw = json!({ "quasarBadgeRenderer": { "label": "a" } });
    {
        let _synthesis = EventCapture::install();
        parser::parse_item(Some(&raw), None).unwrap();
    }

    let capture = EventCapture::install();
    let again = json!({ "quasarBadgeRenderer": { "label": "b" } });
    let node = parser::parse_item(Some(&again), None).unwrap();
    assert_eq!(node.read().string("label"), Some("b"));
    assert!(capture.of_category("class_not_found").is_empty());
    assert!(capture.of_category("class_changed").is_empty());
}

#[test]
fn test_shape_drift_is_reported_and_adopted() {
    let capture = EventCapture::install();
    let first = json!({ "driftyWidgetRenderer": { "value": "text" } });
    parser::parse_item(Some(&first), None).unwrap();

    let second = json!({ "driftyWidgetRenderer": { "value": 3, "extra": true } });
    let node = parser::parse_item(Some(&second), None).unwrap();

    let changed = capture.of_category("class_changed");
    assert_eq!(changed.len(), 1);
    match &changed[0] {
        ParserEvent::ClassChanged { classname, changes } => {
            assert_eq!(classname, "DriftyWidget");
            assert_eq!(changes.len(), 2);
            let value_change = changes.iter().find(|c| c.key == "value").unwrap();
            assert_eq!(value_change.previous, Some(KeyKind::Text));
            assert_eq!(value_change.current, KeyKind::Number);
            let extra_change = changes.iter().find(|c| c.key == "extra").unwrap();
            assert_eq!(extra_change.previous, None);
            assert_eq!(extra_change.current, KeyKind::Boolean);
        }
        other => panic!("unexpected event {other:?}"),
    }

    // The drift-adjusted schema applies to the very sample that drifted.
    assert_eq!(node.read().int("value"), Some(3));
    assert_eq!(node.read().flag("extra"), Some(true));

    let runtime = REGISTRY.runtime_class("DriftyWidget").unwrap();
    assert!(runtime.key_info.iter().any(|r| r.key == "extra"));
}

#[test]
fn test_stub_recurses_into_known_wrappers() {
    let _capture = EventCapture::install();
    let scope = MemoScope::open();
    let raw = json!({ "outerThingRenderer": {
        "content": { "videoRenderer": { "videoId": "nested" } },
        "heading": { "runs": [{ "text": "hi" }] }
    } });
    let node = parser::parse_item(Some(&raw), None).unwrap();

    let inner = node.read().node("content").unwrap();
    assert_eq!(inner.read().type_tag(), "Video");
    assert_eq!(node.read().string("heading"), Some("hi"));

    // Nested known classes memoize like any other item parse.
    assert_eq!(scope.memo().get_type(&["Video"]).len(), 1);
}

#[test]
fn test_stub_arrays_of_wrappers_parse_as_observed_arrays() {
    let _capture = EventCapture::install();
    let raw = json!({ "nebulaListingRenderer": {
        "cards": [
            { "videoRenderer": { "videoId": "a" } },
            { "videoRenderer": { "videoId": "b" } }
        ],
        "flags": [1, 2, 3]
    } });
    let node = parser::parse_item(Some(&raw), None).unwrap();
    let node = node.read();
    assert_eq!(node.array("cards").unwrap().len(), 2);
    // Primitive arrays stay raw.
    assert!(node.raw("flags").is_some());
}
