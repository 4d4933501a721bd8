//! # Configuration Schema and Parsing
//!
//! This module defines how collections are configured, both from a YAML
//! configuration file and programmatically, and the canonical
//! [`CollectionSpec`] every configuration is normalized into.
//!
//! ## Key Components
//!
//! - **`CollectionsConfig`**: An ordered list of collection names and their raw
//!   [`CollectionOptions`]. Declaration order is significant: it decides the
//!   order pattern-matched collections are appended to a document's membership.
//!
//! - **`CollectionOptions`**: The raw, user-facing options of one collection.
//!   Built with chained setters, or parsed from YAML.
//!
//! - **`CollectionSpec`**: The normalized form produced by
//!   [`crate::phases::normalize`]. Nothing past normalization looks at raw
//!   option shapes.
//!
//! ## YAML Format
//!
//! The configuration file is a mapping from collection name to either a
//! pattern shorthand (a string or a list of strings) or an options mapping:
//!
//! ```yaml
//! posts: "posts/*.md"
//! pages: ["*.md", "!index.md"]
//! portfolio:
//!   pattern: "portfolio/*.md"
//!   sort: "date:desc"
//!   limit: 10
//!   refer: true
//!   metadata:
//!     title: My portfolio
//! ```
//!
//! Filters and comparator sorts are closures and can only be set through
//! [`CollectionOptions`] in code.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::sort::{Comparator, SortSpec};
use crate::suggestions;

/// Predicate deciding whether a sorted document stays in a collection
pub type Filter = Arc<dyn Fn(&Document) -> bool + Send + Sync>;

/// Option keys accepted in an options mapping
pub const OPTION_KEYS: [&str; 6] = ["pattern", "sort", "limit", "refer", "filter", "metadata"];

/// Raw sort option before normalization
#[derive(Clone)]
pub enum SortOption {
    /// A `"key[:asc|desc]"` string
    Key(String),
    /// A custom comparator
    Comparator(Comparator),
}

impl fmt::Debug for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOption::Key(key) => write!(f, "{:?}", key),
            SortOption::Comparator(_) => write!(f, "<comparator>"),
        }
    }
}

/// Where a collection's metadata comes from
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataSource {
    /// Inline key/value object
    Inline(Map<String, Value>),
    /// Structured-data file, resolved by the metadata loader
    File(PathBuf),
}

/// Raw options of one collection
#[derive(Clone, Default)]
pub struct CollectionOptions {
    pub(crate) pattern: Vec<String>,
    pub(crate) sort: Option<SortOption>,
    pub(crate) limit: Option<i64>,
    pub(crate) refer: Option<bool>,
    pub(crate) filter: Option<Filter>,
    pub(crate) metadata: Option<MetadataSource>,
}

impl CollectionOptions {
    /// Empty options; every field takes its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a glob pattern (prefix with `!` to exclude)
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern.push(pattern.to_string());
        self
    }

    /// Add several glob patterns
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pattern.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sort by a `"key[:asc|desc]"` specification
    pub fn sort_by(mut self, spec: &str) -> Self {
        self.sort = Some(SortOption::Key(spec.to_string()));
        self
    }

    /// Sort with a custom comparator
    pub fn sort_with<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Document, &Document) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        self.sort = Some(SortOption::Comparator(Arc::new(comparator)));
        self
    }

    /// Keep at most `limit` documents
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Enable or disable previous/next/first/last links
    pub fn refer(mut self, refer: bool) -> Self {
        self.refer = Some(refer);
        self
    }

    /// Keep only documents for which `filter` returns true
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Document) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Attach an inline metadata object
    pub fn metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(MetadataSource::Inline(metadata));
        self
    }

    /// Attach metadata loaded from a JSON, YAML or TOML file
    pub fn metadata_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.metadata = Some(MetadataSource::File(path.as_ref().to_path_buf()));
        self
    }
}

impl From<&str> for CollectionOptions {
    fn from(pattern: &str) -> Self {
        CollectionOptions::new().pattern(pattern)
    }
}

impl From<Vec<&str>> for CollectionOptions {
    fn from(patterns: Vec<&str>) -> Self {
        CollectionOptions::new().patterns(patterns)
    }
}

impl fmt::Debug for CollectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionOptions")
            .field("pattern", &self.pattern)
            .field("sort", &self.sort)
            .field("limit", &self.limit)
            .field("refer", &self.refer)
            .field("filter", &self.filter.as_ref().map(|_| "<filter>"))
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Ordered mapping of collection names to their raw options
#[derive(Debug, Clone, Default)]
pub struct CollectionsConfig {
    entries: Vec<(String, CollectionOptions)>,
}

impl CollectionsConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`CollectionsConfig::insert`]
    pub fn collection(mut self, name: &str, options: impl Into<CollectionOptions>) -> Self {
        self.insert(name, options);
        self
    }

    /// Declare a collection; redeclaring a name replaces its options in place
    pub fn insert(&mut self, name: &str, options: impl Into<CollectionOptions>) {
        let options = options.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = options,
            None => self.entries.push((name.to_string(), options)),
        }
    }

    /// Options for a collection
    pub fn get(&self, name: &str) -> Option<&CollectionOptions> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, options)| options)
    }

    /// Iterate in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionOptions)> {
        self.entries.iter().map(|(n, o)| (n.as_str(), o))
    }

    /// Number of declared collections
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no collection is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical configuration of one collection
#[derive(Clone)]
pub struct CollectionSpec {
    /// Collection name
    pub name: String,
    /// Glob patterns, empty when membership is declared by documents only
    pub pattern: Vec<String>,
    /// Resolved ordering
    pub sort: SortSpec,
    /// Maximum length, `None` for unbounded
    pub limit: Option<usize>,
    /// Whether members get previous/next/first/last links
    pub refer: bool,
    /// Post-sort inclusion filter, `None` accepts everything
    pub filter: Option<Filter>,
    /// Metadata attached to the resolved collection
    pub metadata: Option<Map<String, Value>>,
}

impl CollectionSpec {
    /// Default spec for a collection discovered through document metadata
    pub fn with_defaults(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: Vec::new(),
            sort: SortSpec::default(),
            limit: None,
            refer: true,
            filter: None,
            metadata: None,
        }
    }

    /// Apply the filter, accepting everything when none is set
    pub fn accepts(&self, document: &Document) -> bool {
        self.filter.as_ref().is_none_or(|f| f(document))
    }
}

impl fmt::Debug for CollectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionSpec")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("sort", &self.sort)
            .field("limit", &self.limit)
            .field("refer", &self.refer)
            .field("filter", &self.filter.as_ref().map(|_| "<filter>"))
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Parses a YAML string into a [`CollectionsConfig`].
///
/// An empty document yields an empty configuration, in which case collections
/// can still be discovered from document metadata.
pub fn parse(yaml_content: &str) -> Result<CollectionsConfig> {
    let raw: YamlValue = serde_yaml::from_str(yaml_content).map_err(Error::Yaml)?;

    let mapping = match raw {
        YamlValue::Null => return Ok(CollectionsConfig::new()),
        YamlValue::Mapping(mapping) => mapping,
        _ => {
            return Err(Error::ConfigParse {
                message: "Expected a mapping of collection names to options".to_string(),
                hint: Some("Write each collection as `name: \"pattern\"` or `name: { ... }`".to_string()),
            })
        }
    };

    let mut config = CollectionsConfig::new();
    for (key, value) in mapping {
        let name = match key {
            YamlValue::String(name) => name,
            other => {
                return Err(Error::ConfigParse {
                    message: format!("Collection name must be a string, found {:?}", other),
                    hint: None,
                })
            }
        };
        let options = convert_yaml_options(&name, value)?;
        config.insert(&name, options);
    }

    Ok(config)
}

/// Parse a [`CollectionsConfig`] from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<CollectionsConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Convert one collection's YAML value into raw options
fn convert_yaml_options(name: &str, value: YamlValue) -> Result<CollectionOptions> {
    match value {
        YamlValue::Null => Ok(CollectionOptions::new()),
        YamlValue::String(_) | YamlValue::Sequence(_) => Ok(CollectionOptions {
            pattern: yaml_patterns(name, value)?,
            ..CollectionOptions::default()
        }),
        YamlValue::Mapping(mapping) => {
            let mut options = CollectionOptions::new();
            for (key, value) in mapping {
                let key = key.as_str().ok_or_else(|| {
                    Error::configuration(name, format!("Option keys must be strings, found {:?}", key))
                })?;
                match key {
                    "pattern" => options.pattern = yaml_patterns(name, value)?,
                    "sort" => {
                        options.sort = match value {
                            YamlValue::Null => None,
                            YamlValue::String(spec) => Some(SortOption::Key(spec)),
                            other => {
                                return Err(Error::Configuration {
                                    collection: name.to_string(),
                                    message: format!(
                                        "Unrecognized sort specification {}",
                                        describe(&other)
                                    ),
                                    hint: Some(
                                        "Use a string such as \"date:desc\" or \"title:asc\""
                                            .to_string(),
                                    ),
                                })
                            }
                        }
                    }
                    "limit" => {
                        options.limit = match value {
                            YamlValue::Null => None,
                            YamlValue::Number(n) => Some(n.as_i64().ok_or_else(|| {
                                Error::configuration(name, format!("Limit must be an integer, found {}", n))
                            })?),
                            other => {
                                return Err(Error::configuration(
                                    name,
                                    format!("Limit must be a positive integer, found {}", describe(&other)),
                                ))
                            }
                        }
                    }
                    "refer" => {
                        options.refer = match value {
                            YamlValue::Null => None,
                            YamlValue::Bool(b) => Some(b),
                            other => {
                                return Err(Error::configuration(
                                    name,
                                    format!("Refer must be a boolean, found {}", describe(&other)),
                                ))
                            }
                        }
                    }
                    "metadata" => {
                        options.metadata = match value {
                            YamlValue::Null => None,
                            YamlValue::String(path) => Some(MetadataSource::File(PathBuf::from(path))),
                            YamlValue::Mapping(_) => match serde_json::to_value(&value)? {
                                Value::Object(map) => Some(MetadataSource::Inline(map)),
                                _ => None,
                            },
                            other => {
                                return Err(Error::configuration(
                                    name,
                                    format!(
                                        "Metadata must be a mapping or a file path, found {}",
                                        describe(&other)
                                    ),
                                ))
                            }
                        }
                    }
                    "filter" => {
                        return Err(Error::Configuration {
                            collection: name.to_string(),
                            message: "Filters cannot be expressed in a configuration file".to_string(),
                            hint: Some("Set the filter with CollectionOptions::filter in code".to_string()),
                        })
                    }
                    unknown => {
                        return Err(Error::Configuration {
                            collection: name.to_string(),
                            message: format!("Unknown option '{}'", unknown),
                            hint: Some(suggestions::unknown_option_hint(unknown, &OPTION_KEYS)),
                        })
                    }
                }
            }
            Ok(options)
        }
        other => Err(Error::Configuration {
            collection: name.to_string(),
            message: format!("Unrecognized option shape {}", describe(&other)),
            hint: Some("Use a pattern string, a list of patterns, or an options mapping".to_string()),
        }),
    }
}

/// Read a pattern value: a string or a list of strings
fn yaml_patterns(name: &str, value: YamlValue) -> Result<Vec<String>> {
    match value {
        YamlValue::Null => Ok(Vec::new()),
        YamlValue::String(pattern) => Ok(vec![pattern]),
        YamlValue::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                YamlValue::String(pattern) => Ok(pattern),
                other => Err(Error::configuration(
                    name,
                    format!("Patterns must be strings, found {}", describe(&other)),
                )),
            })
            .collect(),
        other => Err(Error::configuration(
            name,
            format!("Pattern must be a string or a list of strings, found {}", describe(&other)),
        )),
    }
}

/// Short description of a YAML value for error messages
fn describe(value: &YamlValue) -> String {
    match value {
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => format!("boolean {}", b),
        YamlValue::Number(n) => format!("number {}", n),
        YamlValue::String(s) => format!("string {:?}", s),
        YamlValue::Sequence(_) => "a list".to_string(),
        YamlValue::Mapping(_) => "a mapping".to_string(),
        YamlValue::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}
