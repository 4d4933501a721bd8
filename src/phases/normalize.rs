//! Option normalization
//!
//! Turns raw [`CollectionOptions`] into canonical [`CollectionSpec`]s. This is
//! the only place that inspects raw option values: sort strings are parsed,
//! limits validated, patterns checked and metadata files loaded. Any failure
//! here aborts the whole stage.

use log::debug;
use serde_json::Value;

use crate::config::{CollectionOptions, CollectionSpec, CollectionsConfig, MetadataSource, SortOption};
use crate::error::{Error, Result};
use crate::loader::MetadataLoader;
use crate::path::PatternMatcher;
use crate::sort::SortSpec;

/// Normalize every configured collection, in declaration order
pub fn execute(
    config: &CollectionsConfig,
    matcher: &dyn PatternMatcher,
    loader: &dyn MetadataLoader,
) -> Result<Vec<CollectionSpec>> {
    config
        .iter()
        .map(|(name, options)| normalize_collection(name, options, matcher, loader))
        .collect()
}

/// Normalize one collection's options
pub fn normalize_collection(
    name: &str,
    options: &CollectionOptions,
    matcher: &dyn PatternMatcher,
    loader: &dyn MetadataLoader,
) -> Result<CollectionSpec> {
    let mut spec = CollectionSpec::with_defaults(name);

    if !options.pattern.is_empty() {
        matcher
            .check(&options.pattern)
            .map_err(|message| Error::Configuration {
                collection: name.to_string(),
                message: format!("Invalid pattern: {}", message),
                hint: Some("Use * for one path segment and ** to descend into directories".to_string()),
            })?;
        spec.pattern = options.pattern.clone();
    }

    if let Some(sort) = &options.sort {
        spec.sort = match sort {
            SortOption::Key(key) => SortSpec::parse(key).map_err(|message| Error::Configuration {
                collection: name.to_string(),
                message,
                hint: Some("Use \"<key>\", \"<key>:asc\" or \"<key>:desc\"".to_string()),
            })?,
            SortOption::Comparator(cmp) => SortSpec::Comparator(cmp.clone()),
        };
    }

    if let Some(limit) = options.limit {
        spec.limit = match usize::try_from(limit) {
            Ok(limit) if limit > 0 => Some(limit),
            _ => {
                return Err(Error::configuration(
                    name,
                    format!("Limit must be a positive integer, found {}", limit),
                ))
            }
        };
    }

    if let Some(refer) = options.refer {
        spec.refer = refer;
    }

    spec.filter = options.filter.clone();

    spec.metadata = match &options.metadata {
        None => None,
        Some(MetadataSource::Inline(map)) => Some(map.clone()),
        Some(MetadataSource::File(reference)) => {
            let path = loader.resolve(reference);
            debug!(
                "Loading metadata for collection {} from {}",
                name,
                path.display()
            );
            match loader.load(&path) {
                Ok(Value::Object(map)) => Some(map),
                Ok(other) => {
                    return Err(Error::MetadataLoad {
                        collection: name.to_string(),
                        path,
                        message: format!("Expected a key/value object, found {}", value_kind(&other)),
                    })
                }
                Err(message) => {
                    return Err(Error::MetadataLoad {
                        collection: name.to_string(),
                        path,
                        message,
                    })
                }
            }
        }
    };

    debug!("Normalized collection {}: {:?}", name, spec);
    Ok(spec)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
