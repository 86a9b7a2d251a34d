//! Mutation-engine scenarios driven through full response parses.

use serde_json::json;

use crate::{parser::response::parse_response, reporter::ParserEvent, tests::helpers::EventCapture};

fn multi_select_doc(with_mutations: bool) -> serde_json::Value {
    let mut doc = json!({
        "contents": [
            { "musicMultiSelectMenuItemRenderer": {
                "formItemEntityKey": "K1",
                "title": { "runs": [{ "text": "T1" }] }
            } },
            { "musicMultiSelectMenuItemRenderer": {
                "formItemEntityKey": "K2",
                "title": { "runs": [{ "text": "T2" }] }
            } }
        ]
    });
    if with_mutations {
        doc.as_object_mut().unwrap().insert(
            "frameworkUpdates".to_string(),
            json!({ "entityBatchUpdate": { "mutations": [
                { "entityKey": "K1", "payload": { "musicFormBooleanChoice": {
                    "id": "K1", "selected": true, "opaqueToken": "tok"
                } } }
            ] } }),
        );
    }
    doc
}

#[test]
fn test_multi_select_partial_mutations() {
    let capture = EventCapture::install();
    let response = parse_response(&multi_select_doc(true)).unwrap();

    let items = response
        .contents_memo
        .as_ref()
        .unwrap()
        .get_type(&["MusicMultiSelectMenuItem"]);
    assert_eq!(items.len(), 2);
    assert_eq!(items.get(0).unwrap().read().flag("selected"), Some(true));
    assert!(!items.get(1).unwrap().read().has_key("selected"));

    let invalid = capture.of_category("mutation_data_invalid");
    assert_eq!(invalid.len(), 1);
    match &invalid[0] {
        ParserEvent::MutationDataInvalid {
            total,
            failed,
            titles,
            ..
        } => {
            assert_eq!(*total, 2);
            assert_eq!(*failed, 1);
            assert_eq!(titles, &["T2"]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_multi_select_without_framework_updates() {
    let capture = EventCapture::install();
    parse_response(&multi_select_doc(false)).unwrap();

    let missing = capture.of_category("mutation_data_missing");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].classname(), "MusicMultiSelectMenuItem");
}

/// Heat maps have no renderer in the tree; the mutation pass materializes
/// them straight into the contents memo.
#[test]
fn test_heatmap_entity_lands_in_contents_memo() {
    let raw = json!({
        "contents": [{ "videoRenderer": { "videoId": "v" } }],
        "frameworkUpdates": { "entityBatchUpdate": { "mutations": [
            { "entityKey": "hm-1", "payload": { "macroMarkersListEntity": {
                "externalVideoId": "v",
                "markersList": {
                    "markerType": "MARKER_TYPE_HEATMAP",
                    "markers": [
                        { "startMillis": "0", "durationMillis": "2000", "intensityScoreNormalized": 0.4 }
                    ]
                }
            } } }
        ] } }
    });
    let response = parse_response(&raw).unwrap();

    let memo = response.contents_memo.as_ref().unwrap();
    let entities = memo.get_type(&["MacroMarkersListEntity"]);
    assert_eq!(entities.len(), 1);
    assert_eq!(
        entities.first().unwrap().read().string("marker_type"),
        Some("MARKER_TYPE_HEATMAP")
    );
}

#[test]
fn test_comment_view_mutation_correlation() {
    let raw = json!({
        "contents": [
            { "commentThreadRenderer": {
                "commentViewModel": { "commentViewModel": {
                    "commentId": "c1",
                    "commentKey": "ck",
                    "toolbarStateKey": "tsk",
                    "toolbarSurfaceKey": "tsurf",
                    "commentSurfaceKey": "csk"
                } }
            } }
        ],
        "frameworkUpdates": { "entityBatchUpdate": { "mutations": [
            { "entityKey": "ck", "payload": { "commentEntityPayload": {
                "key": "ck",
                "properties": {
                    "content": { "content": "Nice video" },
                    "publishedTime": "2 days ago"
                },
                "author": { "displayName": "Ada", "channelId": "UC1" }
            } } },
            { "entityKey": "tsk", "payload": { "engagementToolbarStateEntityPayload": {
                "key": "tsk", "heartState": "TOOLBAR_HEART_STATE_UNHEARTED"
            } } },
            { "entityKey": "tsurf", "payload": { "engagementToolbarSurfaceEntityPayload": {
                "key": "surface"
            } } },
            { "entityKey": "csk", "payload": { "commentSurfaceEntityPayload": {
                "key": "csk"
            } } }
        ] } }
    });
    let response = parse_response(&raw).unwrap();

    let views = response
        .contents_memo
        .as_ref()
        .unwrap()
        .get_type(&["CommentView"]);
    assert_eq!(views.len(), 1);
    let view = views.first().unwrap();
    let node = view.read();
    assert_eq!(node.string("content"), Some("Nice video"));
    assert_eq!(node.string("author"), Some("Ada"));
    assert_eq!(node.string("published_time"), Some("2 days ago"));
    assert_eq!(
        node.string("heart_state"),
        Some("TOOLBAR_HEART_STATE_UNHEARTED")
    );
    assert!(node.raw("toolbar_surface").is_some());
    assert!(node.raw("comment_surface").is_some());
}

#[test]
fn test_comment_views_without_mutations_report_missing() {
    let capture = EventCapture::install();
    let raw = json!({
        "contents": [
            { "commentViewModel": { "commentId": "c1", "commentKey": "ck" } }
        ]
    });
    parse_response(&raw).unwrap();

    let missing = capture.of_category("mutation_data_missing");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].classname(), "CommentView");
}

/// Mutations never materialize nodes for entities nothing references.
#[test]
fn test_unrelated_mutations_do_not_create_nodes() {
    let raw = json!({
        "contents": [{ "videoRenderer": { "videoId": "v" } }],
        "frameworkUpdates": { "entityBatchUpdate": { "mutations": [
            { "entityKey": "x", "payload": { "somethingElseEntity": { "key": "x" } } }
        ] } }
    });
    let response = parse_response(&raw).unwrap();
    let memo = response.contents_memo.as_ref().unwrap();
    assert_eq!(memo.len(), 1);
    assert!(memo.get("MacroMarkersListEntity").is_none());
}
