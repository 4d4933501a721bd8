//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_config(configs::POSTS)
//!         .with_file("src/posts/a.md", "---\ntitle: A\n---\nBody");
//!     fixture.command().arg("ls").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

use ssg_collections::document::{Document, Files};

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::configs;
    pub use super::{doc, files_from};
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// One pattern collection with the default sort.
    pub const POSTS: &str = r#"
posts: "posts/*.md"
"#;

    /// Two collections exercising sort, limit and refer.
    pub const BLOG: &str = r#"
posts:
  pattern: "posts/*.md"
  sort: "date:desc"
  limit: 2
pages:
  pattern: "*.md"
  sort: "title:asc"
  refer: false
"#;

    /// Invalid option value for error testing.
    pub const BAD_LIMIT: &str = r#"
posts:
  pattern: "*.md"
  limit: 0
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "invalid: yaml: content:";

    /// Empty configuration (comments only).
    pub const EMPTY: &str = "# no configured collections\n";
}

/// Build a document with the given metadata object
#[allow(dead_code)]
pub fn doc(metadata: serde_json::Value) -> Document {
    match metadata {
        serde_json::Value::Object(map) => Document::from_string("").with_metadata(map),
        _ => Document::default(),
    }
}

/// Build a document map from (path, metadata) pairs
#[allow(dead_code)]
pub fn files_from(entries: Vec<(&str, serde_json::Value)>) -> Files {
    let mut files = Files::new();
    for (path, metadata) in entries {
        files.insert(path, doc(metadata));
    }
    files
}

/// A test fixture that provides a temporary site directory.
///
/// The fixture holds a `.collections.yaml` at its root and source documents
/// under `src/`, matching the CLI defaults.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.collections.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".collections.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add a source document under `src/` with front matter.
    pub fn with_document(self, path: &str, front_matter: &str, body: &str) -> Self {
        let content = format!("---\n{}\n---\n{}", front_matter.trim(), body);
        self.with_file(&format!("src/{}", path), &content)
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".collections.yaml")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ssg-collections");
        cmd.current_dir(self.path());
        cmd.env_remove("SSG_COLLECTIONS_CONFIG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
