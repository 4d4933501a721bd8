//! Global metadata context shared by the build pipeline
//!
//! [`Metadata`] replaces an untyped global object: plain values live next to
//! the typed `collections` namespace. Collections can also be published under
//! their bare name, in which case the bare entry and the namespace entry hold
//! the same [`Arc`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::collection::Collection;
use crate::defaults::COLLECTIONS_NAMESPACE;
use crate::document::Files;

/// A top-level entry in the global metadata
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Plain value supplied by the host or an earlier stage
    Value(Value),
    /// A collection published under its bare name
    Collection(Arc<Collection>),
}

/// Global metadata with a grouped collections namespace
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    globals: BTreeMap<String, Entry>,
    collections: Vec<Arc<Collection>>,
}

impl Metadata {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the context with plain global values
    pub fn from_globals(globals: Map<String, Value>) -> Self {
        Self {
            globals: globals
                .into_iter()
                .map(|(k, v)| (k, Entry::Value(v)))
                .collect(),
            collections: Vec::new(),
        }
    }

    /// Set a plain global value, returning the replaced entry
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Entry> {
        self.globals.insert(key.to_string(), Entry::Value(value))
    }

    /// Get a top-level entry
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.globals.get(key)
    }

    /// Get a plain global value
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.globals.get(key) {
            Some(Entry::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Published collections in declaration order
    pub fn collections(&self) -> &[Arc<Collection>] {
        &self.collections
    }

    /// Look up a collection in the namespace
    pub fn collection(&self, name: &str) -> Option<&Arc<Collection>> {
        self.collections.iter().find(|c| c.name() == name)
    }

    /// Drop every published collection, namespaced and bare, keeping plain values
    pub(crate) fn reset_collections(&mut self) {
        self.collections.clear();
        self.globals.retain(|_, entry| matches!(entry, Entry::Value(_)));
    }

    /// Add or replace a collection in the namespace
    pub(crate) fn set_collection(&mut self, collection: Arc<Collection>) {
        match self
            .collections
            .iter_mut()
            .find(|c| c.name() == collection.name())
        {
            Some(slot) => *slot = collection,
            None => self.collections.push(collection),
        }
    }

    /// Publish a collection under its bare name, returning the replaced entry
    pub(crate) fn set_bare(&mut self, collection: Arc<Collection>) -> Option<Entry> {
        self.globals
            .insert(collection.name().to_string(), Entry::Collection(collection))
    }

    /// Render the whole context, resolving collection members through `files`
    pub fn to_json(&self, files: &Files) -> Value {
        let mut root = Map::new();
        for (key, entry) in &self.globals {
            let rendered = match entry {
                Entry::Value(value) => value.clone(),
                Entry::Collection(collection) => collection.to_json(files),
            };
            root.insert(key.clone(), rendered);
        }

        let namespace: Map<String, Value> = self
            .collections
            .iter()
            .map(|c| (c.name().to_string(), c.to_json(files)))
            .collect();
        root.insert(COLLECTIONS_NAMESPACE.to_string(), Value::Object(namespace));

        Value::Object(root)
    }
}
