//! Resolved collections
//!
//! A [`Collection`] is the final, ordered view of one collection: the paths of
//! its member documents after sorting, filtering and limiting, plus the
//! collection-level metadata object. Documents themselves stay in
//! [`Files`]; a collection only refers to them.

use serde_json::{json, Map, Value};

use crate::document::{Document, Files};

/// An ordered, named view over a subset of documents
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    name: String,
    items: Vec<String>,
    metadata: Option<Map<String, Value>>,
}

impl Collection {
    pub(crate) fn new(name: &str, items: Vec<String>, metadata: Option<Map<String, Value>>) -> Self {
        Self {
            name: name.to_string(),
            items,
            metadata,
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member paths in final order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection has no member
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of a document in the collection
    pub fn position(&self, path: &str) -> Option<usize> {
        self.items.iter().position(|p| p == path)
    }

    /// Collection-level metadata
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }

    /// Resolve members against the document map, in order
    pub fn documents<'a>(&'a self, files: &'a Files) -> impl Iterator<Item = &'a Document> + 'a {
        self.items.iter().filter_map(move |path| files.get(path))
    }

    /// Render the collection with its members' metadata
    pub fn to_json(&self, files: &Files) -> Value {
        let items: Vec<Value> = self
            .documents(files)
            .map(|doc| {
                let mut entry = Map::new();
                entry.insert("path".to_string(), Value::String(doc.path().to_string()));
                entry.insert("metadata".to_string(), Value::Object(doc.metadata.clone()));
                if let Some(links) = doc.links(&self.name) {
                    entry.insert("links".to_string(), json!(links));
                }
                Value::Object(entry)
            })
            .collect();

        json!({
            "name": self.name,
            "metadata": self.metadata,
            "items": items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_accessors() {
        let collection = Collection::new("posts", vec!["a.md".to_string(), "b.md".to_string()], None);
        assert_eq!(collection.name(), "posts");
        assert_eq!(collection.len(), 2);
        assert!(!collection.is_empty());
        assert_eq!(collection.position("b.md"), Some(1));
        assert_eq!(collection.position("c.md"), None);
        assert!(collection.metadata().is_none());
    }

    #[test]
    fn test_documents_skips_unknown_paths() {
        let mut files = Files::new();
        files.insert("a.md", Document::from_string("a"));
        let collection = Collection::new("posts", vec!["a.md".to_string(), "gone.md".to_string()], None);
        let paths: Vec<&str> = collection.documents(&files).map(|d| d.path()).collect();
        assert_eq!(paths, vec!["a.md"]);
    }

    #[test]
    fn test_to_json() {
        let mut files = Files::new();
        files.insert("a.md", Document::from_string("a").with_meta("title", "Alpha"));
        let mut meta = Map::new();
        meta.insert("title".to_string(), Value::String("Blog".to_string()));
        let collection = Collection::new("posts", vec!["a.md".to_string()], Some(meta));

        let rendered = collection.to_json(&files);
        assert_eq!(rendered["name"], "posts");
        assert_eq!(rendered["metadata"]["title"], "Blog");
        assert_eq!(rendered["items"][0]["path"], "a.md");
        assert_eq!(rendered["items"][0]["metadata"]["title"], "Alpha");
        assert!(rendered["items"][0].get("links").is_none());
    }

    #[test]
    fn test_to_json_renders_links() {
        let mut files = Files::new();
        files.insert("a.md", Document::default());
        files.get_mut("a.md").unwrap().set_links(
            "posts",
            crate::document::Links {
                first: Some("a.md".to_string()),
                last: Some("a.md".to_string()),
                ..Default::default()
            },
        );
        let collection = Collection::new("posts", vec!["a.md".to_string()], None);

        let links = &collection.to_json(&files)["items"][0]["links"];
        assert_eq!(links["first"], "a.md");
        assert!(links["previous"].is_null());
    }
}
