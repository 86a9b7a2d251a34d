//! Process-wide sink for categorized parser events.
//!
//! The parsers never let a broken renderer sink a whole response; soft
//! failures become [`ParserEvent`]s routed through a single swappable
//! callback. The default callback formats each category through `tracing`.
//! Reporting is fire-and-forget: no event influences parser control flow,
//! and no event short-circuits parsing of sibling items.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;

use crate::parser::stub::{KeyChange, KeyInfo};

/// A categorized, structured diagnostic emitted during parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserEvent {
    /// A node constructor failed; the item slot stays empty.
    Parse {
        classname: String,
        error: String,
        raw: Value,
    },
    /// A dispatched class was outside the caller's allowed type set.
    Typecheck {
        classname: String,
        expected: Vec<String>,
    },
    /// The memo holds affected nodes but the document carried no mutations.
    MutationDataMissing { classname: String },
    /// Aggregate report for mutation entries that could not be applied.
    MutationDataInvalid {
        classname: String,
        total: usize,
        failed: usize,
        titles: Vec<String>,
    },
    /// An unknown class was met and a stub constructor was synthesized.
    ClassNotFound {
        classname: String,
        key_info: KeyInfo,
        sketch: String,
    },
    /// A runtime-synthesized class was seen again with a different shape.
    ClassChanged {
        classname: String,
        changes: Vec<KeyChange>,
    },
}

impl ParserEvent {
    pub fn category(&self) -> &'static str {
        match self {
            ParserEvent::Parse { .. } => "parse",
            ParserEvent::Typecheck { .. } => "typecheck",
            ParserEvent::MutationDataMissing { .. } => "mutation_data_missing",
            ParserEvent::MutationDataInvalid { .. } => "mutation_data_invalid",
            ParserEvent::ClassNotFound { .. } => "class_not_found",
            ParserEvent::ClassChanged { .. } => "class_changed",
        }
    }

    pub fn classname(&self) -> &str {
        match self {
            ParserEvent::Parse { classname, .. }
            | ParserEvent::Typecheck { classname, .. }
            | ParserEvent::MutationDataMissing { classname }
            | ParserEvent::MutationDataInvalid { classname, .. }
            | ParserEvent::ClassNotFound { classname, .. }
            | ParserEvent::ClassChanged { classname, .. } => classname,
        }
    }
}

type Reporter = Arc<dyn Fn(&ParserEvent) + Send + Sync>;

static REPORTER: Lazy<RwLock<Reporter>> = Lazy::new(|| RwLock::new(Arc::new(log_event)));

/// Replace the process-wide event callback. Expected to happen at startup,
/// before any parse is in flight.
pub fn set_reporter(callback: impl Fn(&ParserEvent) + Send + Sync + 'static) {
    *REPORTER.write() = Arc::new(callback);
}

/// Restore the default `tracing`-backed callback.
pub fn reset_reporter() {
    *REPORTER.write() = Arc::new(log_event);
}

/// Route one event through the current callback.
pub fn report(event: ParserEvent) {
    let callback = REPORTER.read().clone();
    callback(&event);
}

fn log_event(event: &ParserEvent) {
    match event {
        ParserEvent::Parse {
            classname, error, ..
        } => {
            tracing::warn!("[{classname}] constructor failed: {error}");
        }
        ParserEvent::Typecheck {
            classname,
            expected,
        } => {
            tracing::warn!("Type mismatch, got {classname} expected one of {expected:?}");
        }
        ParserEvent::MutationDataMissing { classname } => {
            tracing::info!("Mutation data missing for {classname} entries in this response");
        }
        ParserEvent::MutationDataInvalid {
            classname,
            total,
            failed,
            titles,
        } => {
            tracing::warn!(
                "Mutation data invalid for {failed} of {total} {classname} entries: {titles:?}"
            );
        }
        ParserEvent::ClassNotFound {
            classname, sketch, ..
        } => {
            tracing::warn!("Unknown class {classname}, synthesized a stub:\n{sketch}");
        }
        ParserEvent::ClassChanged { classname, changes } => {
            tracing::warn!("Class {classname} changed shape upstream: {changes:?}");
        }
    }
}
