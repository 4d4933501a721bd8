//! Default values for collection configuration.
//!
//! This module provides centralized default values used across the stage and
//! the CLI commands, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".collections.yaml";

/// Default directory holding source documents.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Identity key used when a collection declares no sort.
///
/// Always resolves to the document's own path, never to a metadata field.
pub const DEFAULT_SORT_KEY: &str = "path";

/// Name of the grouped namespace collections are published under.
pub const COLLECTIONS_NAMESPACE: &str = "collections";

/// Returns the default base directory for collection metadata files.
///
/// Relative metadata file references are resolved against this directory
/// when the stage is not given one explicitly.
pub fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_dir_is_current_dir() {
        assert_eq!(default_base_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_default_sort_key() {
        assert_eq!(DEFAULT_SORT_KEY, "path");
    }
}
