//! Structured-data loading for collection metadata files
//!
//! A collection's `metadata` option may name a JSON, YAML or TOML file instead
//! of carrying an inline object. The [`MetadataLoader`] trait is the seam the
//! option normalizer calls through; [`FileLoader`] reads from disk relative to
//! a base directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Loads a structured-data file into a JSON value
pub trait MetadataLoader {
    /// Turn a configured reference into the path that will be loaded.
    fn resolve(&self, reference: &Path) -> PathBuf;

    /// Load and parse the file at a resolved path.
    fn load(&self, path: &Path) -> Result<Value, String>;
}

/// Supported structured-data formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Pick a format from a file extension.
    ///
    /// Unknown extensions are read as YAML, which also accepts JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => DataFormat::Json,
            Some("toml") => DataFormat::Toml,
            _ => DataFormat::Yaml,
        }
    }
}

/// Parse structured text in the given format
pub fn parse_structured(content: &str, format: DataFormat) -> Result<Value, String> {
    match format {
        DataFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DataFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        DataFormat::Toml => toml::from_str::<toml::Value>(content)
            .map_err(|e| e.to_string())
            .and_then(|v| serde_json::to_value(v).map_err(|e| e.to_string())),
    }
}

/// Loads metadata files from disk relative to a base directory
#[derive(Debug, Clone)]
pub struct FileLoader {
    base_dir: PathBuf,
}

impl FileLoader {
    /// Create a loader resolving relative references against `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// The directory relative references are resolved against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl MetadataLoader for FileLoader {
    fn resolve(&self, reference: &Path) -> PathBuf {
        let joined = self.base_dir.join(reference);
        std::path::absolute(&joined).unwrap_or(joined)
    }

    fn load(&self, path: &Path) -> Result<Value, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("No collection metadata file readable at this path ({})", e))?;
        parse_structured(&content, DataFormat::from_path(path))
    }
}
