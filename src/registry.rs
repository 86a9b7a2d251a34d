//! Class-name to constructor registry.
//!
//! The registry maps sanitized class names to the constructors that turn a
//! raw wrapper body into a typed [`Node`]. It is seeded once with every
//! statically known class (see [`crate::nodes`]) and grows at parse time
//! only through [`NodeRegistry::add_runtime_parser`], the append-only path
//! used by the stub generator when an unknown class is met. Runtime
//! entries are tracked separately so tooling can query and persist them.

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;

use crate::{error::InnertubeError, node::Node, parser::stub::KeyInfo};

/// Constructor turning a raw wrapper body into a typed node.
///
/// Statically known classes register plain functions; the stub generator
/// registers closures over an introspected key schema.
pub type NodeConstructor = Arc<dyn Fn(&Value) -> Result<Node, InnertubeError> + Send + Sync>;

/// Metadata for a class synthesized at runtime: the key shape observed on
/// first sight (updated on drift) and the rendered class sketch used for
/// diagnostics.
#[derive(Clone, Debug)]
pub struct RuntimeClass {
    pub classname: String,
    pub key_info: KeyInfo,
    pub sketch: String,
}

#[derive(Default)]
struct RegistryInner {
    parsers: HashMap<String, NodeConstructor>,
    runtime: HashMap<String, RuntimeClass>,
}

/// Thread-safe registry of node constructors.
///
/// Holds the full runtime map (static plus dynamic entries) and the subset
/// map of dynamically added classes.
pub struct NodeRegistry(Arc<RwLock<RegistryInner>>);

impl Clone for NodeRegistry {
    fn clone(&self) -> Self {
        NodeRegistry(self.0.clone())
    }
}

impl NodeRegistry {
    /// Registry pre-populated with all statically known constructors.
    pub fn create() -> Self {
        let registry = NodeRegistry::empty();
        crate::nodes::register_all(&registry);
        registry
    }

    /// An empty registry. Static table seeding happens in [`create`];
    /// isolated tests start from here.
    ///
    /// [`create`]: NodeRegistry::create
    pub fn empty() -> Self {
        NodeRegistry(Arc::new(RwLock::new(RegistryInner::default())))
    }

    /// Register a statically known constructor.
    pub fn register(&self, classname: &str, constructor: NodeConstructor) {
        let mut inner = self.0.write();
        if inner.parsers.contains_key(classname) {
            tracing::warn!("Overwriting registered parser for class {classname}");
        }
        inner.parsers.insert(classname.to_string(), constructor);
    }

    /// Convenience wrapper over [`register`] for plain functions.
    ///
    /// [`register`]: NodeRegistry::register
    pub fn register_fn(
        &self,
        classname: &str,
        constructor: fn(&Value) -> Result<Node, InnertubeError>,
    ) {
        self.register(classname, Arc::new(constructor));
    }

    /// Look a constructor up by sanitized class name.
    pub fn get(&self, classname: &str) -> Option<NodeConstructor> {
        self.0.read().parsers.get(classname).cloned()
    }

    /// Lookup that surfaces a miss as a hard condition, for callers asking
    /// for a class by name. The tolerant item parser never uses this; a
    /// miss there triggers stub synthesis instead.
    pub fn get_or_err(&self, classname: &str) -> Result<NodeConstructor, InnertubeError> {
        self.get(classname)
            .ok_or_else(|| InnertubeError::ModuleNotFound(classname.to_string()))
    }

    pub fn has(&self, classname: &str) -> bool {
        self.0.read().parsers.contains_key(classname)
    }

    /// Append a runtime-synthesized constructor. Statically known classes
    /// are never displaced through this path.
    pub fn add_runtime_parser(&self, class: RuntimeClass, constructor: NodeConstructor) {
        let mut inner = self.0.write();
        let statically_known = inner.parsers.contains_key(&class.classname)
            && !inner.runtime.contains_key(&class.classname);
        if statically_known {
            tracing::warn!(
                "Refusing runtime registration over statically known class {}",
                class.classname
            );
            return;
        }
        inner
            .parsers
            .insert(class.classname.clone(), constructor);
        inner.runtime.insert(class.classname.clone(), class);
    }

    /// Metadata for one runtime-synthesized class, if present.
    pub fn runtime_class(&self, classname: &str) -> Option<RuntimeClass> {
        self.0.read().runtime.get(classname).cloned()
    }

    /// Record a new observed key shape for a runtime class after drift.
    pub fn update_runtime_schema(&self, classname: &str, key_info: KeyInfo, sketch: String) {
        let mut inner = self.0.write();
        if let Some(entry) = inner.runtime.get_mut(classname) {
            entry.key_info = key_info;
            entry.sketch = sketch;
        }
    }

    /// The dynamic-registrations query: every class synthesized at runtime,
    /// so tooling can persist the sketches for manual registry updates.
    pub fn runtime_classes(&self) -> Vec<RuntimeClass> {
        let mut classes: Vec<RuntimeClass> = self.0.read().runtime.values().cloned().collect();
        classes.sort_by(|a, b| a.classname.cmp(&b.classname));
        classes
    }

    pub fn len(&self) -> usize {
        self.0.read().parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().parsers.is_empty()
    }

    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.read().parsers.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Global registry singleton, seeded with the static node table on first
/// access and effectively read-only during parsing apart from stub
/// registrations.
pub static REGISTRY: Lazy<NodeRegistry> = Lazy::new(NodeRegistry::create);
