//! Tolerant parsing of raw InnerTube wrapper trees into typed nodes.
//!
//! ## Key components
//!
//! - [`parse_item`] / [`parse_array`] / [`parse`] - dispatch raw wrappers
//!   to registered constructors, with optional type-set filtering,
//!   memoization into the active [`Memo`](crate::memo::Memo) scope and
//!   structured error capture
//! - [`parse_command`] - dispatch for command/endpoint/action containers
//! - [`parse_continuation`] / [`parse_response_received`] - closed-set
//!   dispatchers for continuation containers and response-received action
//!   batches
//! - [`response`] - orchestration over all known top-level sections
//! - [`mutations`] - entity-batch mutation passes over memoized nodes
//! - [`stub`] - runtime class synthesis for unknown wrapper shapes
//!
//! ## Failure regimes
//!
//! The item parser never throws. A constructor failure, an unknown class
//! or a type-filter miss leaves the slot empty and routes a categorized
//! event through [`crate::reporter`]; a response with three typed children
//! and seven empty slots is strictly preferable to an exception, because
//! downstream callers already handle absence. Hard [`InnertubeError`]s are
//! reserved for shape-contract violations (`parse_array` fed a single
//! wrapper) and explicit registry lookups by name.

pub mod mutations;
pub mod response;
pub mod stub;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::InnertubeError,
    memo,
    node::{handle, NodeHandle, ObservedArray, ParsedValue},
    registry::REGISTRY,
    reporter::{self, ParserEvent},
};

/// Upstream renderer/model suffixes, stripped anywhere in the key.
static CLASS_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new("Renderer|Model").unwrap());

/// Historical alias: upstream still calls mixes "radio".
static MIX_ALIAS_RE: Lazy<Regex> = Lazy::new(|| Regex::new("Radio").unwrap());

/// A container key carrying a dispatchable command payload.
static COMMAND_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?:Command|Endpoint|Action)$").unwrap());

/// Classes dropped silently, with no node, no memo entry and no event.
/// Ad and promo surfaces carry no data any caller consumes.
pub const IGNORED_CLASSES: &[&str] = &[
    "AdSlot",
    "DisplayAd",
    "SearchPyv",
    "MealbarPromo",
    "PrimetimePromo",
    "PromotedSparklesWeb",
    "CompactPromotedVideo",
    "BrandVideoShelf",
    "BrandVideoSingleton",
    "StatementBanner",
    "GuideSigninPromo",
    "AdsEngagementPanelContent",
    "MiniGameCardView",
];

/// Normalize a raw wrapper key into a registry class name: capitalize the
/// first letter, strip `Renderer`/`Model` substrings, alias `Radio` to
/// `Mix`, trim. Lossy on purpose; capture the raw key beforehand if you
/// need it.
pub fn sanitize_class_name(name: &str) -> String {
    let mut capitalized = String::with_capacity(name.len());
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        capitalized.extend(first.to_uppercase());
        capitalized.push_str(chars.as_str());
    }
    let stripped = CLASS_SUFFIX_RE.replace_all(&capitalized, "");
    let aliased = MIX_ALIAS_RE.replace_all(&stripped, "Mix");
    aliased.trim().to_string()
}

pub fn should_ignore(classname: &str) -> bool {
    IGNORED_CLASSES.contains(&classname)
}

/// Parse one wrapper into a typed node.
///
/// Takes the wrapper's first key, sanitizes it and dispatches to the
/// registered constructor, synthesizing a stub constructor for unknown
/// classes. With `allowed_types`, the dispatched tag is checked against
/// the set after dispatch (so the typecheck event can carry both actual
/// and expected tags) and a mismatch leaves the slot empty. On success the
/// node is recorded in the active memo scope under its class name.
///
/// Never returns an error: absent input, empty wrappers, ignored classes,
/// filtered tags and constructor failures all produce `None`.
pub fn parse_item(raw: Option<&Value>, allowed_types: Option<&[&str]>) -> Option<NodeHandle> {
    let obj = raw?.as_object()?;
    let (raw_key, body) = obj.iter().next()?;
    let classname = sanitize_class_name(raw_key);
    if should_ignore(&classname) {
        return None;
    }

    let constructor = match REGISTRY.get(&classname) {
        Some(constructor) => {
            if REGISTRY.runtime_class(&classname).is_some() {
                stub::check_for_drift(&classname, body);
            }
            constructor
        }
        None => stub::generate_class(&classname, body),
    };

    if let Some(allowed) = allowed_types {
        if !allowed.contains(&classname.as_str()) {
            reporter::report(ParserEvent::Typecheck {
                classname,
                expected: allowed.iter().map(|t| t.to_string()).collect(),
            });
            return None;
        }
    }

    match constructor(body) {
        Ok(node) => {
            let node = handle(node);
            if let Some(active) = memo::active() {
                active.add(&classname, node.clone());
            }
            Some(node)
        }
        Err(err) => {
            reporter::report(ParserEvent::Parse {
                classname,
                error: err.to_string(),
                raw: body.clone(),
            });
            None
        }
    }
}

/// Parse an ordered list of wrappers, collecting the non-empty results in
/// source order.
///
/// Absent input yields an empty array. A single wrapper where a list was
/// required is the one shape mismatch this layer refuses to paper over.
pub fn parse_array(
    raw: Option<&Value>,
    allowed_types: Option<&[&str]>,
) -> Result<ObservedArray, InnertubeError> {
    match raw {
        None | Some(Value::Null) => Ok(ObservedArray::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| parse_item(Some(item), allowed_types))
            .collect()),
        Some(Value::Object(map)) => {
            let classname = map
                .keys()
                .next()
                .map(|k| sanitize_class_name(k))
                .unwrap_or_else(|| "{}".to_string());
            Err(InnertubeError::ExpectedArray { classname })
        }
        Some(other) => Err(InnertubeError::ExpectedArray {
            classname: json_type_name(other).to_string(),
        }),
    }
}

/// Unified entry point over [`parse_item`] and [`parse_array`].
///
/// With `require_array` the result is an observed array; without, the
/// result mirrors the input shape as a [`ParsedValue`].
pub fn parse(
    raw: Option<&Value>,
    require_array: bool,
    allowed_types: Option<&[&str]>,
) -> Result<Option<ParsedValue>, InnertubeError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    if require_array || value.is_array() {
        let items = parse_array(Some(value), allowed_types)?;
        return Ok(Some(ParsedValue::Array(items)));
    }
    Ok(parse_item(Some(value), allowed_types).map(ParsedValue::Node))
}

/// Construct a class known to be registered, reporting constructor
/// failures softly. Shared by the command and closed-set dispatchers;
/// unlike [`parse_item`] this path never synthesizes stubs and never
/// records the produced node itself into the memo (nested item parses
/// inside the constructor still do).
pub(crate) fn construct_known(classname: &str, body: &Value) -> Option<NodeHandle> {
    let constructor = REGISTRY.get(classname)?;
    match constructor(body) {
        Ok(node) => Some(handle(node)),
        Err(err) => {
            reporter::report(ParserEvent::Parse {
                classname: classname.to_string(),
                error: err.to_string(),
                raw: body.clone(),
            });
            None
        }
    }
}

/// Dispatch the first command/endpoint/action key of a container.
///
/// Command-bearing containers multiplex many sibling keys; only the first
/// key matching the action suffix set carries the payload, and unknown
/// sibling keys must not provoke errors, so unregistered commands are
/// dropped silently rather than stubbed.
pub fn parse_command(raw: Option<&Value>) -> Option<NodeHandle> {
    let obj = raw?.as_object()?;
    let (key, body) = obj.iter().find(|(k, _)| COMMAND_KEY_RE.is_match(k))?;
    let classname = sanitize_class_name(key);
    if should_ignore(&classname) || !REGISTRY.has(&classname) {
        return None;
    }
    construct_known(&classname, body)
}

/// Batch form of [`parse_command`] over a JSON array.
pub fn parse_commands(raw: Option<&Value>) -> ObservedArray {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| parse_command(Some(item)))
                .collect()
        })
        .unwrap_or_default()
}

/// Continuation-container wrapper keys and their node classes. Closed set;
/// exactly one branch fires and unknown keys yield empty.
const CONTINUATION_KEYS: &[(&str, &str)] = &[
    ("timedContinuationData", "TimedContinuation"),
    ("itemSectionContinuation", "ItemSectionContinuation"),
    ("sectionListContinuation", "SectionListContinuation"),
    ("liveChatContinuation", "LiveChatContinuation"),
    ("musicPlaylistShelfContinuation", "MusicPlaylistShelfContinuation"),
    ("musicShelfContinuation", "MusicShelfContinuation"),
    ("gridContinuation", "GridContinuation"),
    ("playlistPanelContinuation", "PlaylistPanelContinuation"),
    ("continuationCommand", "ContinuationCommand"),
];

/// Map a continuation container to its matching continuation node.
pub fn parse_continuation(raw: Option<&Value>) -> Option<NodeHandle> {
    let obj = raw?.as_object()?;
    CONTINUATION_KEYS.iter().find_map(|(key, classname)| {
        obj.get(*key)
            .and_then(|body| construct_known(classname, body))
    })
}

const RESPONSE_RECEIVED_KEYS: &[(&str, &str)] = &[
    ("navigateAction", "NavigateAction"),
    ("showMiniplayerCommand", "ShowMiniplayerCommand"),
    ("reloadContinuationItemsCommand", "ReloadContinuationItemsCommand"),
    ("appendContinuationItemsAction", "AppendContinuationItemsAction"),
    ("openPopupAction", "OpenPopupAction"),
];

/// Dispatch a batch of response-received actions, filtering out entries
/// that match none of the known container keys.
pub fn parse_response_received(raw: Option<&Value>) -> ObservedArray {
    raw.and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let obj = entry.as_object()?;
                    RESPONSE_RECEIVED_KEYS.iter().find_map(|(key, classname)| {
                        obj.get(*key)
                            .and_then(|body| construct_known(classname, body))
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_class_name() {
        assert_eq!(sanitize_class_name("videoRenderer"), "Video");
        assert_eq!(sanitize_class_name("musicRadioShelfRenderer"), "MusicMixShelf");
        assert_eq!(sanitize_class_name("commentViewModel"), "CommentView");
        assert_eq!(sanitize_class_name("macroMarkersListEntity"), "MacroMarkersListEntity");
        assert_eq!(sanitize_class_name("browseEndpoint"), "BrowseEndpoint");
        assert_eq!(sanitize_class_name(""), "");
    }

    #[test]
    fn test_sanitize_strips_all_occurrences() {
        assert_eq!(sanitize_class_name("modelRendererModel"), "");
        assert_eq!(sanitize_class_name("radioRadio"), "MixMix");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["videoRenderer", "musicRadioShelfRenderer", "commentViewModel"] {
            let once = sanitize_class_name(raw);
            assert_eq!(sanitize_class_name(&once), once);
        }
    }

    #[test]
    fn test_ignored_classes_produce_nothing() {
        let scope = crate::memo::MemoScope::open();
        assert!(parse_item(Some(&json!({ "adSlotRenderer": {} })), None).is_none());
        assert!(parse_item(Some(&json!({ "displayAdRenderer": {} })), None).is_none());
        assert!(scope.memo().is_empty());
    }

    #[test]
    fn test_parse_item_empty_inputs() {
        assert!(parse_item(None, None).is_none());
        assert!(parse_item(Some(&json!({})), None).is_none());
        assert!(parse_item(Some(&json!("text")), None).is_none());
    }

    #[test]
    fn test_parse_array_shape_contract() {
        assert!(parse_array(None, None).unwrap().is_empty());
        assert!(parse_array(Some(&Value::Null), None).unwrap().is_empty());

        let single = json!({ "videoRenderer": { "videoId": "a" } });
        assert_eq!(
            parse_array(Some(&single), None),
            Err(InnertubeError::ExpectedArray {
                classname: "Video".to_string()
            })
        );
        assert!(matches!(
            parse_array(Some(&json!("nope")), None),
            Err(InnertubeError::ExpectedArray { .. })
        ));
    }

    #[test]
    fn test_poly_parse_mirrors_input_shape() {
        let as_list = json!([{ "videoRenderer": { "videoId": "a" } }]);
        let parsed = parse(Some(&as_list), false, None).unwrap().unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);

        let as_item = json!({ "videoRenderer": { "videoId": "a" } });
        let parsed = parse(Some(&as_item), false, None).unwrap().unwrap();
        assert_eq!(parsed.as_node().unwrap().read().type_tag(), "Video");

        assert!(parse(None, false, None).unwrap().is_none());
        assert!(parse(Some(&Value::Null), true, None).unwrap().is_none());
    }

    #[test]
    fn test_parse_command_takes_first_action_key() {
        let raw = json!({
            "clickTrackingParams": "xyz",
            "loggingContext": {},
            "browseEndpoint": { "browseId": "UCabc" }
        });
        let node = parse_command(Some(&raw)).unwrap();
        assert_eq!(node.read().type_tag(), "BrowseEndpoint");
    }

    #[test]
    fn test_parse_command_ignores_unknown_siblings() {
        let raw = json!({ "fancyNewTelemetryCommand": { "payload": 1 } });
        assert!(parse_command(Some(&raw)).is_none());
    }

    #[test]
    fn test_continuation_dispatch_unknown_key_is_empty() {
        let raw = json!({ "mysteryContinuation": { "token": "t" } });
        assert!(parse_continuation(Some(&raw)).is_none());
    }
}
