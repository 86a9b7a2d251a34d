//! Entity-batch mutation application.
//!
//! Some payload state arrives out-of-band in
//! `frameworkUpdates.entityBatchUpdate.mutations` instead of inside the
//! renderer tree. After structural parsing the response parser replays
//! those mutation records onto the nodes captured in the section memo.
//! Apart from heat-map entities, mutations only ever patch nodes that
//! already exist; they never create entries for entities without a memo
//! counterpart.

use serde_json::Value;

use crate::{
    memo::Memo,
    node::{handle, NodeValue},
    registry::REGISTRY,
    reporter::{self, ParserEvent},
};

const MULTI_SELECT_CLASS: &str = "MusicMultiSelectMenuItem";
const HEATMAP_CLASS: &str = "MacroMarkersListEntity";
const COMMENT_VIEW_CLASS: &str = "CommentView";

/// Run every mutation pass against one section memo.
pub fn apply_mutations(memo: &Memo, mutations: Option<&[Value]>) {
    apply_multi_select_mutations(memo, mutations);
    apply_heatmap_mutations(memo, mutations);
    apply_comment_mutations(memo, mutations);
}

/// Patch the `selected` state of every memoized multi-select menu item
/// from its matching `musicFormBooleanChoice` payload. Items without a
/// usable payload are reported once, aggregated.
fn apply_multi_select_mutations(memo: &Memo, mutations: Option<&[Value]>) {
    let items = memo.get_type(&[MULTI_SELECT_CLASS]);
    if items.is_empty() {
        return;
    }
    let Some(mutations) = mutations else {
        reporter::report(ParserEvent::MutationDataMissing {
            classname: MULTI_SELECT_CLASS.to_string(),
        });
        return;
    };

    let mut failed_titles = Vec::new();
    for item in &items {
        let entity_key = item
            .read()
            .string("form_item_entity_key")
            .map(str::to_string);
        let choice = entity_key.as_deref().and_then(|key| {
            mutations.iter().find_map(|mutation| {
                let choice = mutation.get("payload")?.get("musicFormBooleanChoice")?;
                (choice.get("id")?.as_str()? == key).then_some(choice)
            })
        });
        // Both `selected` and `opaqueToken` must be defined for the patch
        // to be trustworthy.
        let selected = choice.and_then(|choice| {
            choice.get("opaqueToken")?;
            choice.get("selected")?.as_bool()
        });
        match selected {
            Some(selected) => item.write().set("selected", NodeValue::Bool(selected)),
            None => failed_titles.push(
                item.read()
                    .string("title")
                    .unwrap_or_default()
                    .to_string(),
            ),
        }
    }

    if !failed_titles.is_empty() {
        reporter::report(ParserEvent::MutationDataInvalid {
            classname: MULTI_SELECT_CLASS.to_string(),
            total: items.len(),
            failed: failed_titles.len(),
            titles: failed_titles,
        });
    }
}

/// Append a node for every heat-map marker entity found in the mutation
/// list. The only place where mutation application adds new nodes to the
/// memo; heat maps have no renderer counterpart in the tree.
fn apply_heatmap_mutations(memo: &Memo, mutations: Option<&[Value]>) {
    let Some(mutations) = mutations else {
        return;
    };
    let Some(constructor) = REGISTRY.get(HEATMAP_CLASS) else {
        return;
    };
    for mutation in mutations {
        let Some(entity) = mutation
            .get("payload")
            .and_then(|payload| payload.get("macroMarkersListEntity"))
        else {
            continue;
        };
        let marker_type = entity
            .get("markersList")
            .and_then(|list| list.get("markerType"))
            .and_then(Value::as_str);
        if marker_type != Some("MARKER_TYPE_HEATMAP") {
            continue;
        }
        match constructor(entity) {
            Ok(node) => memo.add(HEATMAP_CLASS, handle(node)),
            Err(err) => reporter::report(ParserEvent::Parse {
                classname: HEATMAP_CLASS.to_string(),
                error: err.to_string(),
                raw: entity.clone(),
            }),
        }
    }
}

/// Correlate each memoized comment view with its four entity payloads and
/// let the node patch itself. Any of the four may be absent.
///
/// The pass runs even when the memo holds no comment views; that case is
/// silent, matching longstanding behavior callers depend on.
fn apply_comment_mutations(memo: &Memo, mutations: Option<&[Value]>) {
    let views = memo.get_type(&[COMMENT_VIEW_CLASS]);
    if views.is_empty() {
        return;
    }
    let Some(mutations) = mutations else {
        reporter::report(ParserEvent::MutationDataMissing {
            classname: COMMENT_VIEW_CLASS.to_string(),
        });
        return;
    };

    for view in &views {
        let (comment_key, toolbar_state_key, toolbar_surface_key, surface_key) = {
            let node = view.read();
            (
                node.string("comment_key").map(str::to_string),
                node.string("toolbar_state_key").map(str::to_string),
                node.string("toolbar_surface_key").map(str::to_string),
                node.string("surface_key").map(str::to_string),
            )
        };
        let comment = find_payload(mutations, "commentEntityPayload", comment_key.as_deref());
        let toolbar_state = find_payload(
            mutations,
            "engagementToolbarStateEntityPayload",
            toolbar_state_key.as_deref(),
        );
        let toolbar_surface =
            find_toolbar_surface(mutations, toolbar_surface_key.as_deref());
        let surface = find_payload(
            mutations,
            "commentSurfaceEntityPayload",
            surface_key.as_deref(),
        );
        crate::nodes::comments::apply_comment_mutations(
            view,
            comment,
            toolbar_state,
            toolbar_surface,
            surface,
        );
    }
}

/// Locate a sub-payload by its own `key` field.
fn find_payload<'a>(
    mutations: &'a [Value],
    payload_key: &str,
    entity_key: Option<&str>,
) -> Option<&'a Value> {
    let entity_key = entity_key?;
    mutations.iter().find_map(|mutation| {
        let payload = mutation.get("payload")?.get(payload_key)?;
        (payload.get("key")?.as_str()? == entity_key).then_some(payload)
    })
}

/// The toolbar surface is keyed by the mutation record's top-level
/// `entityKey`, not by a key inside the payload.
fn find_toolbar_surface<'a>(
    mutations: &'a [Value],
    entity_key: Option<&str>,
) -> Option<&'a Value> {
    let entity_key = entity_key?;
    mutations.iter().find_map(|mutation| {
        if mutation.get("entityKey")?.as_str()? != entity_key {
            return None;
        }
        mutation
            .get("payload")?
            .get("engagementToolbarSurfaceEntityPayload")
    })
}
