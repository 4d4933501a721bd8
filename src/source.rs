//! Reading source directories into a document map
//!
//! Every regular file below the source root becomes a [`Document`]. A leading
//! YAML front matter block delimited by `---` lines is parsed into the
//! document's metadata and stripped from its contents.

use std::fs;
use std::path::Path;

use log::{debug, trace};
use regex::Regex;
use serde_json::{Map, Value};

use crate::document::{Document, Files};
use crate::error::{Error, Result};

const FRONT_MATTER: &str = r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n?---[ \t]*(?:\r?\n|\z)";

/// Splits front matter from document contents
#[derive(Debug, Clone)]
pub struct FrontMatterParser {
    pattern: Regex,
}

impl FrontMatterParser {
    /// Compile the front matter pattern
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(FRONT_MATTER)?,
        })
    }

    /// Split raw file bytes into metadata and remaining contents.
    ///
    /// Non-UTF-8 files and files without front matter keep their bytes
    /// unchanged and get empty metadata. `path` is only used for errors.
    pub fn parse(&self, path: &Path, raw: Vec<u8>) -> Result<Document> {
        let text = match std::str::from_utf8(&raw) {
            Ok(text) => text,
            Err(_) => return Ok(Document::new(raw)),
        };

        let captures = match self.pattern.captures(text) {
            Some(captures) => captures,
            None => return Ok(Document::new(raw)),
        };

        let block = captures.get(1).map(|m| m.as_str()).unwrap_or("");
        let end = captures.get(0).map(|m| m.end()).unwrap_or(0);
        let metadata = parse_block(path, block)?;
        let contents = text[end..].as_bytes().to_vec();

        Ok(Document::new(contents).with_metadata(metadata))
    }
}

fn parse_block(path: &Path, block: &str) -> Result<Map<String, Value>> {
    if block.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_yaml::from_str(block).map_err(|e| Error::Source {
        path: path.to_path_buf(),
        message: format!("Invalid front matter: {}", e),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(Error::Source {
            path: path.to_path_buf(),
            message: "Front matter must be a key/value mapping".to_string(),
        }),
    }
}

/// Read every file below `root` into a document map
///
/// Hidden files and directories are skipped. Paths are stored relative to
/// `root` with forward slashes.
pub fn read_dir(root: &Path) -> Result<Files> {
    let parser = FrontMatterParser::new()?;
    let mut files = Files::new();

    for entry in walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_name().to_str().unwrap_or("").starts_with('.')
        })
    {
        let entry = entry.map_err(|e| Error::Source {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        let relative = file_path.strip_prefix(root).map_err(|_| Error::Source {
            path: file_path.to_path_buf(),
            message: "Failed to make path relative to the source directory".to_string(),
        })?;
        let raw = fs::read(file_path)?;
        let document = parser.parse(file_path, raw)?;
        trace!(
            "Read {} ({} metadata keys)",
            relative.display(),
            document.metadata.len()
        );
        files.insert(&relative.to_string_lossy(), document);
    }

    debug!("Read {} documents from {}", files.len(), root.display());
    Ok(files)
}
