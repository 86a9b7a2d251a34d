//! Response-level orchestration.
//!
//! [`parse_response`] walks every known top-level section of a raw
//! response document, applying the section's parse strategy and scoping a
//! fresh [`Memo`] around each memo-producing section. Structural parsing
//! is followed by the mutation passes (see [`super::mutations`]) against
//! the `contents` and `onResponseReceivedEndpoints` memos.
//!
//! Player-side sections (`streamingData`, `playabilityStatus`, ...) are
//! not renderer trees; they are projected structurally into plain typed
//! shapes defined here.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::InnertubeError,
    memo::{Memo, MemoScope},
    node::{NodeHandle, ObservedArray, ParsedValue},
    nodes::util::{int_of, string_of},
    parser::{self, mutations},
};

/// Per-response cache of cipher nonces, shared between regular and
/// adaptive format construction so deciphering work is not repeated for
/// formats carrying the same cipher.
pub type NonceCache = Arc<RwLock<HashMap<String, String>>>;

/// One media format projected from `streamingData`.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub itag: i64,
    pub mime_type: String,
    pub bitrate: Option<i64>,
    pub average_bitrate: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub fps: Option<i64>,
    pub quality: Option<String>,
    pub quality_label: Option<String>,
    pub audio_quality: Option<String>,
    pub audio_sample_rate: Option<i64>,
    pub audio_channels: Option<i64>,
    pub content_length: Option<i64>,
    pub approx_duration_ms: Option<i64>,
    pub last_modified: Option<String>,
    pub url: Option<String>,
    pub signature_cipher: Option<String>,
    /// Nonce allocated (or reused) from the per-response cache when the
    /// format carries a cipher.
    pub cipher_nonce: Option<String>,
}

impl Format {
    pub fn from_raw(data: &Value, nonce_cache: &NonceCache) -> Result<Format, InnertubeError> {
        let itag = int_of(data, "itag")
            .ok_or_else(|| InnertubeError::missing_field("Format", "itag"))?;
        let mime_type = string_of(data, "mimeType")
            .ok_or_else(|| InnertubeError::missing_field("Format", "mimeType"))?;
        let signature_cipher =
            string_of(data, "signatureCipher").or_else(|| string_of(data, "cipher"));
        let cipher_nonce = signature_cipher.as_ref().map(|cipher| {
            nonce_cache
                .write()
                .entry(cipher.clone())
                .or_insert_with(|| Uuid::new_v4().simple().to_string())
                .clone()
        });
        Ok(Format {
            itag,
            mime_type,
            bitrate: int_of(data, "bitrate"),
            average_bitrate: int_of(data, "averageBitrate"),
            width: int_of(data, "width"),
            height: int_of(data, "height"),
            fps: int_of(data, "fps"),
            quality: string_of(data, "quality"),
            quality_label: string_of(data, "qualityLabel"),
            audio_quality: string_of(data, "audioQuality"),
            audio_sample_rate: int_of(data, "audioSampleRate"),
            audio_channels: int_of(data, "audioChannels"),
            content_length: int_of(data, "contentLength"),
            approx_duration_ms: int_of(data, "approxDurationMs"),
            last_modified: string_of(data, "lastModified"),
            url: string_of(data, "url"),
            signature_cipher,
            cipher_nonce,
        })
    }
}

/// Typed stream descriptor for the `streamingData` section.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingData {
    /// Absolute expiry derived from the relative `expiresInSeconds`.
    pub expires: SystemTime,
    pub formats: Vec<Format>,
    pub adaptive_formats: Vec<Format>,
    pub dash_manifest_url: Option<String>,
    pub hls_manifest_url: Option<String>,
    pub server_abr_streaming_url: Option<String>,
}

impl StreamingData {
    pub fn from_raw(data: &Value) -> Result<StreamingData, InnertubeError> {
        let expires_in_seconds = int_of(data, "expiresInSeconds")
            .ok_or_else(|| InnertubeError::missing_field("StreamingData", "expiresInSeconds"))?;
        let expires =
            SystemTime::now() + Duration::from_millis((expires_in_seconds as u64) * 1000);
        let nonce_cache: NonceCache = Arc::new(RwLock::new(HashMap::new()));
        Ok(StreamingData {
            expires,
            formats: collect_formats(data.get("formats"), &nonce_cache),
            adaptive_formats: collect_formats(data.get("adaptiveFormats"), &nonce_cache),
            dash_manifest_url: string_of(data, "dashManifestUrl"),
            hls_manifest_url: string_of(data, "hlsManifestUrl"),
            server_abr_streaming_url: string_of(data, "serverAbrStreamingUrl"),
        })
    }
}

fn collect_formats(raw: Option<&Value>, nonce_cache: &NonceCache) -> Vec<Format> {
    raw.and_then(Value::as_array)
        .map(|formats| {
            formats
                .iter()
                .filter_map(|format| match Format::from_raw(format, nonce_cache) {
                    Ok(format) => Some(format),
                    Err(err) => {
                        tracing::warn!("Skipping malformed format: {err}");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Projection of `playabilityStatus`.
#[derive(Debug, Clone, Default)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
    pub embeddable: Option<bool>,
    pub error_screen: Option<NodeHandle>,
}

impl PlayabilityStatus {
    pub fn from_raw(data: &Value) -> PlayabilityStatus {
        PlayabilityStatus {
            status: string_of(data, "status"),
            reason: string_of(data, "reason"),
            embeddable: data.get("playableInEmbed").and_then(Value::as_bool),
            error_screen: parser::parse_item(data.get("errorScreen"), None),
        }
    }
}

/// Projection of `playbackTracking`; each entry is a `{ baseUrl }` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackTracking {
    pub videostats_playback_url: Option<String>,
    pub videostats_watchtime_url: Option<String>,
    pub ptracking_url: Option<String>,
    pub qoe_url: Option<String>,
    pub atr_url: Option<String>,
}

impl PlaybackTracking {
    pub fn from_raw(data: &Value) -> PlaybackTracking {
        let base_url = |key: &str| {
            data.get(key)
                .and_then(|entry| entry.get("baseUrl"))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        PlaybackTracking {
            videostats_playback_url: base_url("videostatsPlaybackUrl"),
            videostats_watchtime_url: base_url("videostatsWatchtimeUrl"),
            ptracking_url: base_url("ptrackingUrl"),
            qoe_url: base_url("qoeUrl"),
            atr_url: base_url("atrUrl"),
        }
    }
}

/// Projection of `playerConfig`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerConfig {
    pub loudness_db: Option<f64>,
    pub perceptual_loudness_db: Option<f64>,
    pub enable_per_format_loudness: Option<bool>,
    pub max_bitrate: Option<i64>,
}

impl PlayerConfig {
    pub fn from_raw(data: &Value) -> PlayerConfig {
        let audio = data.get("audioConfig");
        let selection = data.get("streamSelectionConfig");
        PlayerConfig {
            loudness_db: audio
                .and_then(|a| a.get("loudnessDb"))
                .and_then(Value::as_f64),
            perceptual_loudness_db: audio
                .and_then(|a| a.get("perceptualLoudnessDb"))
                .and_then(Value::as_f64),
            enable_per_format_loudness: audio
                .and_then(|a| a.get("enablePerFormatLoudness"))
                .and_then(Value::as_bool),
            max_bitrate: selection.and_then(|s| int_of(s, "maxBitrate")),
        }
    }
}

/// Projection of the botguard `bgChallenge` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BgChallenge {
    pub interpreter_url: Option<String>,
    pub interpreter_hash: Option<String>,
    pub program: Option<String>,
    pub global_name: Option<String>,
    pub client_experiments_state_blob: Option<String>,
}

impl BgChallenge {
    pub fn from_raw(data: &Value) -> BgChallenge {
        BgChallenge {
            interpreter_url: data
                .get("interpreterUrl")
                .and_then(|url| url.get("privateDoNotAccessOrElseTrustedResourceUrlWrappedValue"))
                .and_then(Value::as_str)
                .map(str::to_string),
            interpreter_hash: string_of(data, "interpreterHash"),
            program: string_of(data, "program"),
            global_name: string_of(data, "globalName"),
            client_experiments_state_blob: string_of(data, "clientExperimentsStateBlob"),
        }
    }
}

/// Projection of `cpnInfo`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CpnInfo {
    pub cpn: Option<String>,
    pub cpn_source: Option<String>,
}

impl CpnInfo {
    pub fn from_raw(data: &Value) -> CpnInfo {
        CpnInfo {
            cpn: string_of(data, "cpn"),
            cpn_source: string_of(data, "cpnSource"),
        }
    }
}

/// The parsed response record. Every field is present iff the input
/// section was present and non-empty; memo-producing sections carry a
/// sibling `<section>_memo`.
#[derive(Debug, Default)]
pub struct ParsedResponse {
    pub contents: Option<ParsedValue>,
    pub contents_memo: Option<Memo>,
    pub on_response_received_actions: Option<ObservedArray>,
    pub on_response_received_actions_memo: Option<Memo>,
    pub on_response_received_endpoints: Option<ObservedArray>,
    pub on_response_received_endpoints_memo: Option<Memo>,
    pub on_response_received_commands: Option<ObservedArray>,
    pub on_response_received_commands_memo: Option<Memo>,
    pub continuation_contents: Option<NodeHandle>,
    pub continuation_contents_memo: Option<Memo>,
    pub actions: Option<ParsedValue>,
    pub actions_memo: Option<Memo>,
    pub live_chat_item_context_menu_supported_renderers: Option<NodeHandle>,
    pub live_chat_item_context_menu_supported_renderers_memo: Option<Memo>,
    pub header: Option<ParsedValue>,
    pub header_memo: Option<Memo>,
    pub items: Option<ParsedValue>,
    pub items_memo: Option<Memo>,
    pub metadata: Option<ParsedValue>,
    pub player_overlays: Option<ParsedValue>,
    pub sidebar: Option<NodeHandle>,
    pub microformat: Option<NodeHandle>,
    pub overlay: Option<NodeHandle>,
    pub captions: Option<NodeHandle>,
    pub storyboards: Option<NodeHandle>,
    pub endscreen: Option<NodeHandle>,
    pub cards: Option<NodeHandle>,
    pub background: Option<NodeHandle>,
    pub alerts: Option<ObservedArray>,
    pub annotations: Option<ObservedArray>,
    pub engagement_panels: Option<ObservedArray>,
    pub continuation: Option<NodeHandle>,
    pub continuation_endpoint: Option<NodeHandle>,
    pub refinements: Option<Vec<String>>,
    pub estimated_results: Option<u64>,
    pub target_id: Option<String>,
    pub challenge: Option<String>,
    pub playback_tracking: Option<PlaybackTracking>,
    pub playability_status: Option<PlayabilityStatus>,
    pub player_config: Option<PlayerConfig>,
    pub bg_challenge: Option<BgChallenge>,
    pub cpn_info: Option<CpnInfo>,
    pub streaming_data: Option<StreamingData>,
    pub video_details: Option<NodeHandle>,
    pub current_video_endpoint: Option<NodeHandle>,
    pub endpoint: Option<NodeHandle>,
    pub entries: Option<ObservedArray>,
    pub player_response: Option<Box<ParsedResponse>>,
    pub watch_next_response: Option<Box<ParsedResponse>>,
}

/// Parse a full raw response document.
///
/// Soft failures inside sections leave their slots empty; the only hard
/// errors escaping this function are shape-contract violations in
/// array-typed sections.
pub fn parse_response(doc: &Value) -> Result<ParsedResponse, InnertubeError> {
    let obj = doc
        .as_object()
        .ok_or_else(|| InnertubeError::Parse("response root must be an object".to_string()))?;
    let mut response = ParsedResponse::default();

    if let Some(value) = obj.get("contents") {
        let scope = MemoScope::open();
        response.contents = parser::parse(Some(value), false, None)?;
        response.contents_memo = Some(scope.memo());
    }

    if let Some(value) = obj.get("onResponseReceivedActions") {
        let scope = MemoScope::open();
        response.on_response_received_actions =
            Some(parser::parse_response_received(Some(value)));
        response.on_response_received_actions_memo = Some(scope.memo());
    }
    if let Some(value) = obj.get("onResponseReceivedEndpoints") {
        let scope = MemoScope::open();
        response.on_response_received_endpoints =
            Some(parser::parse_response_received(Some(value)));
        response.on_response_received_endpoints_memo = Some(scope.memo());
    }
    if let Some(value) = obj.get("onResponseReceivedCommands") {
        let scope = MemoScope::open();
        response.on_response_received_commands =
            Some(parser::parse_response_received(Some(value)));
        response.on_response_received_commands_memo = Some(scope.memo());
    }

    if let Some(value) = obj.get("continuationContents") {
        let scope = MemoScope::open();
        response.continuation_contents = parser::parse_continuation(Some(value));
        response.continuation_contents_memo = Some(scope.memo());
    }

    if let Some(value) = obj.get("actions") {
        // Tracking params are stripped from each entry before dispatch so
        // the first remaining key names the action class. The input
        // document stays untouched; stripping happens on a clone.
        let cleaned = strip_click_tracking(value);
        let scope = MemoScope::open();
        response.actions = parser::parse(Some(&cleaned), false, None)?;
        response.actions_memo = Some(scope.memo());
    }

    if let Some(value) = obj.get("liveChatItemContextMenuSupportedRenderers") {
        let scope = MemoScope::open();
        response.live_chat_item_context_menu_supported_renderers =
            parser::parse_item(Some(value), None);
        response.live_chat_item_context_menu_supported_renderers_memo = Some(scope.memo());
    }

    if let Some(value) = obj.get("header") {
        let scope = MemoScope::open();
        response.header = parser::parse(Some(value), false, None)?;
        response.header_memo = Some(scope.memo());
    }
    if let Some(value) = obj.get("items") {
        let scope = MemoScope::open();
        response.items = parser::parse(Some(value), false, None)?;
        response.items_memo = Some(scope.memo());
    }
    response.metadata = parser::parse(obj.get("metadata"), false, None)?;
    response.player_overlays = parser::parse(obj.get("playerOverlays"), false, None)?;

    response.sidebar = parser::parse_item(obj.get("sidebar"), None);
    response.microformat = parser::parse_item(obj.get("microformat"), None);
    response.overlay = parser::parse_item(obj.get("overlay"), None);
    response.captions = parser::parse_item(obj.get("captions"), None);
    response.storyboards = parser::parse_item(obj.get("storyboards"), None);
    response.endscreen = parser::parse_item(obj.get("endscreen"), None);
    response.cards = parser::parse_item(obj.get("cards"), None);
    response.background = parser::parse_item(obj.get("background"), None);

    if obj.get("alerts").is_some() {
        response.alerts = Some(parser::parse_array(
            obj.get("alerts"),
            Some(&["Alert", "AlertWithButton"]),
        )?);
    }
    if obj.get("annotations").is_some() {
        response.annotations = Some(parser::parse_array(
            obj.get("annotations"),
            Some(&["PlayerAnnotationsExpanded"]),
        )?);
    }
    if obj.get("engagementPanels").is_some() {
        response.engagement_panels = Some(parser::parse_array(
            obj.get("engagementPanels"),
            Some(&["EngagementPanelSectionList"]),
        )?);
    }

    response.continuation = parser::parse_continuation(obj.get("continuation"));
    response.continuation_endpoint = parser::parse_continuation(obj.get("continuationEndpoint"));

    if let Some(refinements) = obj.get("refinements").and_then(Value::as_array) {
        response.refinements = Some(
            refinements
                .iter()
                .filter_map(|r| r.as_str().map(str::to_string))
                .collect(),
        );
    }
    response.estimated_results = obj.get("estimatedResults").and_then(coerce_u64);
    response.target_id = string_of(doc, "targetId");
    response.challenge = string_of(doc, "challenge");

    response.playback_tracking = obj.get("playbackTracking").map(PlaybackTracking::from_raw);
    response.playability_status = obj
        .get("playabilityStatus")
        .map(PlayabilityStatus::from_raw);
    response.player_config = obj.get("playerConfig").map(PlayerConfig::from_raw);
    response.bg_challenge = obj.get("bgChallenge").map(BgChallenge::from_raw);
    response.cpn_info = obj.get("cpnInfo").map(CpnInfo::from_raw);

    if let Some(value) = obj.get("streamingData") {
        match StreamingData::from_raw(value) {
            Ok(streaming_data) => response.streaming_data = Some(streaming_data),
            Err(err) => tracing::warn!("Skipping malformed streamingData: {err}"),
        }
    }

    if let Some(value) = obj.get("videoDetails") {
        response.video_details = parser::construct_known("VideoDetails", value);
    }
    if let Some(value) = obj.get("currentVideoEndpoint") {
        response.current_video_endpoint = parser::construct_known("NavigationEndpoint", value);
    }
    if let Some(value) = obj.get("endpoint") {
        response.endpoint = parser::construct_known("NavigationEndpoint", value);
    }
    if let Some(entries) = obj.get("entries").and_then(Value::as_array) {
        response.entries = Some(
            entries
                .iter()
                .filter_map(|entry| parser::construct_known("NavigationEndpoint", entry))
                .collect(),
        );
    }

    if let Some(value) = obj.get("playerResponse") {
        response.player_response = parse_nested(value);
    }
    if let Some(value) = obj.get("watchNextResponse") {
        response.watch_next_response = parse_nested(value);
    }

    let mutations = obj
        .get("frameworkUpdates")
        .and_then(|updates| updates.get("entityBatchUpdate"))
        .and_then(|batch| batch.get("mutations"))
        .and_then(Value::as_array)
        .map(Vec::as_slice);
    if let Some(memo) = &response.contents_memo {
        mutations::apply_mutations(memo, mutations);
    }
    if let Some(memo) = &response.on_response_received_endpoints_memo {
        mutations::apply_mutations(memo, mutations);
    }

    Ok(response)
}

/// Recursive re-entry for embedded responses. The memo scope stack keeps
/// the child's memos isolated from the enclosing parse.
fn parse_nested(value: &Value) -> Option<Box<ParsedResponse>> {
    match parse_response(value) {
        Ok(nested) => Some(Box::new(nested)),
        Err(err) => {
            tracing::warn!("Skipping malformed nested response: {err}");
            None
        }
    }
}

/// Clone a section value with `clickTrackingParams` removed from each
/// top-level entry.
fn strip_click_tracking(value: &Value) -> Value {
    let mut cleaned = value.clone();
    match &mut cleaned {
        Value::Array(entries) => {
            for entry in entries {
                if let Some(obj) = entry.as_object_mut() {
                    obj.shift_remove("clickTrackingParams");
                }
            }
        }
        Value::Object(obj) => {
            obj.shift_remove("clickTrackingParams");
        }
        _ => {}
    }
    cleaned
}

fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_streaming_data_expiry_and_formats() {
        let before = SystemTime::now();
        let data = StreamingData::from_raw(&json!({
            "expiresInSeconds": "21540",
            "formats": [
                { "itag": 18, "mimeType": "video/mp4", "bitrate": 500000, "url": "https://example.com/v" }
            ],
            "adaptiveFormats": [
                { "itag": 140, "mimeType": "audio/mp4", "contentLength": "123456" },
                { "mimeType": "audio/mp4" }
            ],
            "hlsManifestUrl": "https://example.com/hls.m3u8"
        }))
        .unwrap();

        assert!(data.expires >= before + Duration::from_secs(21540));
        assert_eq!(data.formats.len(), 1);
        // The itag-less adaptive format is skipped, not fatal.
        assert_eq!(data.adaptive_formats.len(), 1);
        assert_eq!(data.adaptive_formats[0].content_length, Some(123456));
        assert_eq!(data.hls_manifest_url.as_deref(), Some("https://example.com/hls.m3u8"));
    }

    #[test]
    fn test_streaming_data_requires_expiry() {
        assert!(StreamingData::from_raw(&json!({ "formats": [] })).is_err());
    }

    #[test]
    fn test_formats_share_nonce_per_cipher() {
        let cache: NonceCache = Arc::new(RwLock::new(HashMap::new()));
        let a = Format::from_raw(
            &json!({ "itag": 18, "mimeType": "video/mp4", "signatureCipher": "s=abc" }),
            &cache,
        )
        .unwrap();
        let b = Format::from_raw(
            &json!({ "itag": 22, "mimeType": "video/mp4", "signatureCipher": "s=abc" }),
            &cache,
        )
        .unwrap();
        let c = Format::from_raw(
            &json!({ "itag": 140, "mimeType": "audio/mp4", "signatureCipher": "s=xyz" }),
            &cache,
        )
        .unwrap();

        assert!(a.cipher_nonce.is_some());
        assert_eq!(a.cipher_nonce, b.cipher_nonce);
        assert_ne!(a.cipher_nonce, c.cipher_nonce);
        assert_eq!(cache.read().len(), 2);
    }

    #[test]
    fn test_strip_click_tracking_clones() {
        let original = json!([
            { "clickTrackingParams": "x", "addToPlaylistCommand": {} },
            { "other": 1 }
        ]);
        let cleaned = strip_click_tracking(&original);
        assert!(cleaned[0].get("clickTrackingParams").is_none());
        // Input untouched.
        assert!(original[0].get("clickTrackingParams").is_some());
    }

    #[test]
    fn test_coerce_u64() {
        assert_eq!(coerce_u64(&json!("1024")), Some(1024));
        assert_eq!(coerce_u64(&json!(7)), Some(7));
        assert_eq!(coerce_u64(&json!("nope")), None);
    }

    #[test]
    fn test_playback_tracking_projection() {
        let tracking = PlaybackTracking::from_raw(&json!({
            "videostatsPlaybackUrl": { "baseUrl": "https://s.example.com/playback" },
            "qoeUrl": { "baseUrl": "https://s.example.com/qoe" }
        }));
        assert_eq!(
            tracking.videostats_playback_url.as_deref(),
            Some("https://s.example.com/playback")
        );
        assert!(tracking.ptracking_url.is_none());
    }
}
