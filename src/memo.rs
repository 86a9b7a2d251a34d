//! Per-section scratch index over parsed nodes.
//!
//! While a response section parses, every node the item parser produces is
//! recorded in the section's [`Memo`] under its sanitized class name, in
//! the depth-first order constructors finish. The mutation engine and
//! feature-level callers consult the memo instead of re-walking the tree.
//!
//! Exactly one memo is active per in-flight section parse. The active memo
//! is a thread-local slot managed by [`MemoScope`], an RAII guard whose
//! drop restores the previous slot; nested response parses therefore get
//! the save/restore discipline for free.

use std::{cell::RefCell, collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    error::InnertubeError,
    node::{NodeHandle, ObservedArray},
};

#[derive(Default)]
struct MemoInner {
    entries: HashMap<String, Vec<(u64, NodeHandle)>>,
    next_seq: u64,
}

/// Multimap from class name to parsed nodes in discovery order.
///
/// Cheaply cloneable; clones share the same backing store so the response
/// parser can both thread a memo through the active slot and hand it out
/// with the section result.
pub struct Memo(Arc<RwLock<MemoInner>>);

impl Clone for Memo {
    fn clone(&self) -> Self {
        Memo(self.0.clone())
    }
}

impl Default for Memo {
    fn default() -> Self {
        Memo::new()
    }
}

impl std::fmt::Debug for Memo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.0.read();
        let mut counts: Vec<(String, usize)> = inner
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.len()))
            .collect();
        counts.sort();
        f.debug_struct("Memo").field("classes", &counts).finish()
    }
}

impl Memo {
    pub fn new() -> Self {
        Memo(Arc::new(RwLock::new(MemoInner::default())))
    }

    /// Record a parsed node under its class name.
    pub fn add(&self, classname: &str, node: NodeHandle) {
        let mut inner = self.0.write();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .entries
            .entry(classname.to_string())
            .or_default()
            .push((seq, node));
    }

    /// All nodes recorded under one class name, in insertion order.
    pub fn get(&self, classname: &str) -> Option<ObservedArray> {
        let inner = self.0.read();
        inner
            .entries
            .get(classname)
            .map(|nodes| nodes.iter().map(|(_, n)| n.clone()).collect())
    }

    /// Union over several type tags, preserving global insertion order.
    pub fn get_type(&self, tags: &[&str]) -> ObservedArray {
        let inner = self.0.read();
        let mut matched: Vec<(u64, NodeHandle)> = tags
            .iter()
            .filter_map(|tag| inner.entries.get(*tag))
            .flatten()
            .cloned()
            .collect();
        matched.sort_by_key(|(seq, _)| *seq);
        matched.into_iter().map(|(_, n)| n).collect()
    }

    pub fn has(&self, classname: &str) -> bool {
        self.0.read().entries.contains_key(classname)
    }

    /// Total number of recorded nodes across all classes.
    pub fn len(&self) -> usize {
        self.0.read().entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().entries.is_empty()
    }

    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.read().entries.keys().cloned().collect();
        names.sort();
        names
    }
}

thread_local! {
    static ACTIVE: RefCell<Vec<Memo>> = const { RefCell::new(Vec::new()) };
}

/// The memo currently collecting parsed nodes, if a scope is open.
pub fn active() -> Option<Memo> {
    ACTIVE.with(|stack| stack.borrow().last().cloned())
}

/// Hard-condition accessor for callers that require an open scope.
pub fn active_or_err() -> Result<Memo, InnertubeError> {
    active().ok_or(InnertubeError::MemoInactive)
}

/// RAII guard scoping a fresh memo as the active one.
///
/// Opened at section entry by the response parser; nested scopes shadow the
/// outer memo and dropping the guard restores it, so a recursive response
/// parse cannot corrupt its parent's memo.
pub struct MemoScope {
    memo: Memo,
}

impl MemoScope {
    pub fn open() -> Self {
        let memo = Memo::new();
        ACTIVE.with(|stack| stack.borrow_mut().push(memo.clone()));
        MemoScope { memo }
    }

    pub fn memo(&self) -> Memo {
        self.memo.clone()
    }
}

impl Drop for MemoScope {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{handle, Node};

    fn tagged(tag: &str) -> NodeHandle {
        handle(Node::new(tag))
    }

    #[test]
    fn test_insertion_order_per_class() {
        let memo = Memo::new();
        for _ in 0..3 {
            memo.add("Video", tagged("Video"));
        }
        assert_eq!(memo.get("Video").unwrap().len(), 3);
        assert!(memo.get("Shelf").is_none());
        assert_eq!(memo.len(), 3);
    }

    #[test]
    fn test_multi_tag_union_keeps_global_order() {
        let memo = Memo::new();
        memo.add("Video", tagged("Video"));
        memo.add("Shelf", tagged("Shelf"));
        memo.add("Video", tagged("Video"));

        let union = memo.get_type(&["Shelf", "Video"]);
        let tags: Vec<String> = union
            .iter()
            .map(|n| n.read().type_tag().to_string())
            .collect();
        assert_eq!(tags, vec!["Video", "Shelf", "Video"]);
    }

    #[test]
    fn test_active_scope_nesting() {
        assert!(active().is_none());
        assert_eq!(active_or_err().unwrap_err(), InnertubeError::MemoInactive);

        let outer = MemoScope::open();
        outer.memo().add("Video", tagged("Video"));
        {
            let inner = MemoScope::open();
            inner.memo().add("Shelf", tagged("Shelf"));
            assert!(active().unwrap().has("Shelf"));
            assert!(!active().unwrap().has("Video"));
        }
        // Inner scope dropped, outer memo restored untouched.
        assert!(active().unwrap().has("Video"));
        assert!(!active().unwrap().has("Shelf"));
        drop(outer);
        assert!(active().is_none());
    }
}
