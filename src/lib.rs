//! # innertube-core
//!
//! A Rust library for parsing InnerTube responses - the semi-structured,
//! tree-shaped RPC payloads used by the streaming-media backend - into
//! strongly typed node trees.
//!
//! ## Overview
//!
//! An InnerTube response is an untyped recursive document where every
//! interior object is a single-key *wrapper*: the key names a
//! renderer/command/endpoint class, the value is that class's raw body.
//! innertube-core converts that polymorphic document into typed
//! [`Node`](node::Node) trees, applies out-of-band entity mutations
//! against already-parsed nodes, and synthesizes stub node classes at
//! runtime for class names it has never seen, so a new upstream schema
//! never sinks a response.
//!
//! ### Key features
//!
//! - **Registry dispatch**: class names map to constructors through a
//!   global [`registry`], pre-populated with the static node table and
//!   extended at parse time by the stub generator
//! - **Error tolerance**: constructor failures, unknown classes and type
//!   filter misses leave empty slots and emit structured
//!   [`reporter`] events instead of throwing
//! - **Per-section memos**: every memo-producing section records its
//!   parsed nodes by class name for mutation application and fast lookup
//! - **Runtime class synthesis**: unknown wrappers are introspected into
//!   key schemas, registered as working stub constructors, and reported
//!   with a code-like class sketch that drives manual registry updates
//! - **Shape drift detection**: later sightings of a synthesized class
//!   are diffed against the recorded schema
//!
//! ## Quick start
//!
//! ```rust
//! use innertube_core::parser::response::parse_response;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), innertube_core::InnertubeError> {
//! let raw = json!({
//!     "contents": [
//!         { "videoRenderer": { "videoId": "dQw4w9WgXcQ" } },
//!         { "adSlotRenderer": {} }
//!     ]
//! });
//! let response = parse_response(&raw)?;
//!
//! // Ad surfaces are dropped silently; the memo indexes what survived.
//! let videos = response.contents_memo.as_ref().unwrap().get_type(&["Video"]);
//! assert_eq!(videos.len(), 1);
//! assert_eq!(videos.first().unwrap().read().string("video_id"), Some("dQw4w9WgXcQ"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`node`]**: the typed node model (`Node`, `ObservedArray`,
//!   `ParsedValue`)
//! - **[`registry`]**: class-name to constructor mapping with runtime
//!   additions
//! - **[`memo`]**: per-section scratch index and the active-memo scope
//! - **[`parser`]**: sanitizer, item/array/poly parsing, command and
//!   continuation dispatch, response orchestration, mutation passes,
//!   stub synthesis
//! - **[`reporter`]**: pluggable sink for the categorized parser events
//!
//! Transport, session/auth, URL deciphering and continuation fetching are
//! deliberately out of scope; callers feed an already-deserialized
//! `serde_json::Value` in and consume typed results.

pub mod error;
pub mod memo;
pub mod node;
mod nodes;
pub mod parser;
pub mod registry;
pub mod reporter;
#[cfg(test)]
mod tests;

pub use error::*;
