//! In-memory document map handed to the collections stage
//!
//! A [`Document`] is one input file: its raw contents, the metadata parsed from
//! its front matter, the collections it belongs to and, once the stage has
//! run, its position links inside each collection. [`Files`] owns every
//! document, keyed by its path relative to the source root.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::path::normalize_path;

/// Metadata key holding declared collection membership
pub const COLLECTION_KEY: &str = "collection";

/// Position of a document inside one resolved collection
///
/// Every field holds the path of the referenced document, resolved through
/// [`Files`] when needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links {
    /// Preceding document, absent for the first element
    pub previous: Option<String>,
    /// Following document, absent for the last element
    pub next: Option<String>,
    /// First document of the collection
    pub first: Option<String>,
    /// Last document of the collection
    pub last: Option<String>,
}

/// Represents a document with contents and metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Raw contents (front matter already stripped)
    pub contents: Vec<u8>,
    /// Arbitrary key/value metadata
    pub metadata: Map<String, Value>,
    /// Names of the collections this document belongs to, in resolution order
    pub collection: Vec<String>,
    links: BTreeMap<String, Links>,
    path: String,
}

impl Document {
    /// Create a new document with contents
    pub fn new(contents: Vec<u8>) -> Self {
        Self {
            contents,
            ..Self::default()
        }
    }

    /// Create a new document from string contents
    pub fn from_string(contents: &str) -> Self {
        Self::new(contents.as_bytes().to_vec())
    }

    /// Builder-style metadata assignment
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Replace all metadata at once
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// The document's key in its [`Files`] map
    ///
    /// Empty until the document is inserted.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a top-level metadata value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Contents as UTF-8 text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }

    /// Links of this document inside the named collection
    pub fn links(&self, collection: &str) -> Option<&Links> {
        self.links.get(collection)
    }

    /// All collection links, keyed by collection name
    pub fn all_links(&self) -> &BTreeMap<String, Links> {
        &self.links
    }

    pub(crate) fn set_links(&mut self, collection: &str, links: Links) {
        self.links.insert(collection.to_string(), links);
    }

    pub(crate) fn clear_links(&mut self, collection: &str) {
        self.links.remove(collection);
    }

    /// Collection names this document declares for itself.
    ///
    /// Reads the `collection` metadata field (a string or a list of strings)
    /// followed by any names already present in [`Document::collection`],
    /// de-duplicated in first-seen order.
    pub fn declared_collections(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        };

        match self.metadata.get(COLLECTION_KEY) {
            Some(Value::String(name)) => push(name),
            Some(Value::Array(items)) => {
                for item in items {
                    match item {
                        Value::String(name) => push(name),
                        other => log::debug!(
                            "Ignoring non-string collection name {} in {}",
                            other,
                            self.path
                        ),
                    }
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => log::debug!(
                "Ignoring unsupported collection declaration {} in {}",
                other,
                self.path
            ),
        }

        for name in &self.collection {
            push(name);
        }

        names
    }

    /// Record resolved membership on both the field and the metadata
    pub(crate) fn set_membership(&mut self, names: Vec<String>) {
        self.metadata.insert(
            COLLECTION_KEY.to_string(),
            Value::Array(names.iter().cloned().map(Value::String).collect()),
        );
        self.collection = names;
    }
}

/// Path-ordered map of all documents in a build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Files {
    /// Documents stored as path -> document mapping
    files: BTreeMap<String, Document>,
}

impl Files {
    /// Create a new empty document map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document, returning the previous one
    pub fn insert(&mut self, path: &str, mut document: Document) -> Option<Document> {
        let path = normalize_path(path);
        document.path = path.clone();
        self.files.insert(path, document)
    }

    /// Add a document from string contents and metadata
    pub fn insert_string(&mut self, path: &str, contents: &str, metadata: Map<String, Value>) {
        self.insert(path, Document::from_string(contents).with_metadata(metadata));
    }

    /// Get a document by path
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.files.get(path)
    }

    /// Get a mutable document by path
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Document> {
        self.files.get_mut(path)
    }

    /// Remove a document
    pub fn remove(&mut self, path: &str) -> Option<Document> {
        self.files.remove(path)
    }

    /// Check if a document exists
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// All paths in order
    pub fn paths(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// Get the number of documents
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all documents as (path, document) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.files.iter().map(|(path, doc)| (path.as_str(), doc))
    }

    /// Iterate mutably over all documents
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Document)> {
        self.files.iter_mut().map(|(path, doc)| (path.as_str(), doc))
    }

    /// Document preceding `path` in the named collection
    pub fn previous(&self, path: &str, collection: &str) -> Option<&Document> {
        self.follow(path, collection, |links| links.previous.as_deref())
    }

    /// Document following `path` in the named collection
    pub fn next(&self, path: &str, collection: &str) -> Option<&Document> {
        self.follow(path, collection, |links| links.next.as_deref())
    }

    /// First document of the named collection, seen from `path`
    pub fn first(&self, path: &str, collection: &str) -> Option<&Document> {
        self.follow(path, collection, |links| links.first.as_deref())
    }

    /// Last document of the named collection, seen from `path`
    pub fn last(&self, path: &str, collection: &str) -> Option<&Document> {
        self.follow(path, collection, |links| links.last.as_deref())
    }

    fn follow<F>(&self, path: &str, collection: &str, pick: F) -> Option<&Document>
    where
        F: Fn(&Links) -> Option<&str>,
    {
        let links = self.get(path)?.links(collection)?;
        self.get(pick(links)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_sets_path() {
        let mut files = Files::new();
        files.insert("./posts\\one.md", Document::from_string("one"));
        let doc = files.get("posts/one.md").unwrap();
        assert_eq!(doc.path(), "posts/one.md");
        assert_eq!(doc.text(), "one");
    }

    #[test]
    fn test_paths_are_sorted() {
        let mut files = Files::new();
        files.insert("b.md", Document::default());
        files.insert("a.md", Document::default());
        files.insert("c/a.md", Document::default());
        assert_eq!(files.paths(), vec!["a.md", "b.md", "c/a.md"]);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_declared_collections_from_string() {
        let doc = Document::default().with_meta("collection", "posts");
        assert_eq!(doc.declared_collections(), vec!["posts"]);
    }

    #[test]
    fn test_declared_collections_from_list_dedups() {
        let doc = Document::default().with_meta("collection", json!(["b", "a", "b"]));
        assert_eq!(doc.declared_collections(), vec!["b", "a"]);
    }

    #[test]
    fn test_declared_collections_includes_field() {
        let mut doc = Document::default().with_meta("collection", json!(["b"]));
        doc.collection = vec!["a".to_string(), "b".to_string()];
        assert_eq!(doc.declared_collections(), vec!["b", "a"]);
    }

    #[test]
    fn test_declared_collections_ignores_other_types() {
        let doc = Document::default().with_meta("collection", json!(42));
        assert!(doc.declared_collections().is_empty());
        let doc = Document::default().with_meta("collection", json!(["a", 1, null]));
        assert_eq!(doc.declared_collections(), vec!["a"]);
    }

    #[test]
    fn test_set_membership_mirrors_metadata() {
        let mut doc = Document::default();
        doc.set_membership(vec!["posts".to_string(), "news".to_string()]);
        assert_eq!(doc.collection, vec!["posts", "news"]);
        assert_eq!(doc.get("collection"), Some(&json!(["posts", "news"])));
    }

    #[test]
    fn test_follow_links() {
        let mut files = Files::new();
        files.insert("a.md", Document::default());
        files.insert("b.md", Document::default());
        files.get_mut("a.md").unwrap().set_links(
            "posts",
            Links {
                previous: None,
                next: Some("b.md".to_string()),
                first: Some("a.md".to_string()),
                last: Some("b.md".to_string()),
            },
        );

        assert_eq!(files.next("a.md", "posts").unwrap().path(), "b.md");
        assert!(files.previous("a.md", "posts").is_none());
        assert_eq!(files.first("a.md", "posts").unwrap().path(), "a.md");
        assert_eq!(files.last("a.md", "posts").unwrap().path(), "b.md");
        assert!(files.next("a.md", "other").is_none());
    }
}
