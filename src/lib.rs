//! # Static-Site Collections Library
//!
//! This library groups the documents of a static-site build into named,
//! ordered, cross-linked collections. It is used by the `ssg-collections`
//! command-line tool but is designed to run as one stage inside any build
//! pipeline that holds documents in memory.
//!
//! ## Quick Example
//!
//! ```
//! use ssg_collections::config::{CollectionOptions, CollectionsConfig};
//! use ssg_collections::document::{Document, Files};
//! use ssg_collections::metadata::Metadata;
//! use ssg_collections::stage::{Collections, Plugin, StageSettings};
//!
//! let mut files = Files::new();
//! files.insert("posts/first.md", Document::from_string("One").with_meta("date", "2024-01-01"));
//! files.insert("posts/second.md", Document::from_string("Two").with_meta("date", "2024-02-01"));
//!
//! let config = CollectionsConfig::new()
//!     .collection("posts", CollectionOptions::new().pattern("posts/*.md").sort_by("date:desc"));
//! let stage = Collections::new(&config, StageSettings::default()).unwrap();
//!
//! let mut metadata = Metadata::new();
//! stage.run(&mut files, &mut metadata).unwrap();
//!
//! let posts = metadata.collection("posts").unwrap();
//! assert_eq!(posts.items(), ["posts/second.md", "posts/first.md"]);
//! assert_eq!(files.next("posts/second.md", "posts").unwrap().path(), "posts/first.md");
//! ```
//!
//! ## Core Concepts
//!
//! - **Documents (`document`)**: The in-memory file map handed to the stage.
//!   Documents carry front matter metadata, their collection membership and
//!   per-collection position links.
//! - **Configuration (`config`)**: Collection options, written in YAML or built
//!   in code, and the normalized `CollectionSpec` they become.
//! - **Collections (`collection`, `metadata`)**: Resolved, ordered views over
//!   documents, published into the global metadata context.
//! - **Phases (`phases`)**: Normalization, membership, finalization and
//!   publishing.
//! - **Collaborators (`path`, `loader`, `source`)**: Glob matching, metadata
//!   file loading and front matter parsing, each behind a small seam.
//!
//! ## Execution Flow
//!
//! 1.  **Normalization**: `Collections::new` turns options into specs once.
//! 2.  **Membership**: Every run decides each document's collections from its
//!     own `collection` field and from collection patterns.
//! 3.  **Finalization**: Each collection is sorted, filtered, limited and linked.
//! 4.  **Publishing**: Collections are written into the global metadata.

pub mod collection;
pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod keypath;
pub mod loader;
pub mod metadata;
pub mod output;
pub mod path;
pub mod phases;
pub mod sort;
pub mod source;
pub mod stage;
pub mod suggestions;

#[cfg(test)]
mod path_proptest;
#[cfg(test)]
mod phases_proptest;
