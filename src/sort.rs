//! Collection ordering
//!
//! A collection is ordered either by a key path into document metadata with a
//! direction, written as `"key[:asc|desc]"`, or by a user comparator. Key
//! ordering treats falsy or missing values as the least possible value.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::defaults::DEFAULT_SORT_KEY;
use crate::document::Document;
use crate::keypath::{lookup, parse_key_path, PathSegment};

/// User-supplied ordering between two documents
pub type Comparator = Arc<dyn Fn(&Document, &Document) -> Ordering + Send + Sync>;

/// Sort direction for key-based ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest value first, missing values first
    #[default]
    Asc,
    /// Largest value first, missing values last
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Resolved ordering of a collection
#[derive(Clone)]
pub enum SortSpec {
    /// Order by a metadata key path
    Key {
        key: String,
        segments: Vec<PathSegment>,
        order: SortOrder,
    },
    /// Order with a custom comparator
    Comparator(Comparator),
}

impl SortSpec {
    /// Order by `key` in the given direction
    pub fn by_key(key: &str, order: SortOrder) -> Self {
        SortSpec::Key {
            key: key.to_string(),
            segments: parse_key_path(key),
            order,
        }
    }

    /// Parse a `"key[:asc|desc]"` specification.
    ///
    /// A key without a direction sorts descending.
    ///
    /// ```
    /// use ssg_collections::sort::{SortOrder, SortSpec};
    ///
    /// let spec = SortSpec::parse("date").unwrap();
    /// assert_eq!(spec.order(), Some(SortOrder::Desc));
    /// ```
    pub fn parse(spec: &str) -> Result<Self, String> {
        let (key, order) = match spec.rsplit_once(':') {
            Some((key, direction)) => {
                let order = match direction.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortOrder::Asc,
                    "desc" => SortOrder::Desc,
                    other => {
                        return Err(format!(
                            "Invalid sort direction '{}' in '{}', expected 'asc' or 'desc'",
                            other, spec
                        ))
                    }
                };
                (key.trim(), order)
            }
            None => (spec.trim(), SortOrder::Desc),
        };

        if parse_key_path(key).is_empty() {
            return Err(format!("Sort specification '{}' has an empty key", spec));
        }

        Ok(SortSpec::by_key(key, order))
    }

    /// The key path, for key-based specs
    pub fn key(&self) -> Option<&str> {
        match self {
            SortSpec::Key { key, .. } => Some(key),
            SortSpec::Comparator(_) => None,
        }
    }

    /// The direction, for key-based specs
    pub fn order(&self) -> Option<SortOrder> {
        match self {
            SortSpec::Key { order, .. } => Some(*order),
            SortSpec::Comparator(_) => None,
        }
    }

    /// Compare two documents under this spec
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        match self {
            SortSpec::Key {
                key,
                segments,
                order,
            } => {
                let left = sort_value(a, key, segments);
                let right = sort_value(b, key, segments);
                order.apply(compare_values(left.as_deref(), right.as_deref()))
            }
            SortSpec::Comparator(cmp) => cmp(a, b),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::by_key(DEFAULT_SORT_KEY, SortOrder::Asc)
    }
}

impl fmt::Debug for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortSpec::Key { key, order, .. } => write!(f, "{}:{}", key, order),
            SortSpec::Comparator(_) => write!(f, "<comparator>"),
        }
    }
}

/// Value used to sort a document.
///
/// The identity key always reads the document's own path, ignoring any `path`
/// field in its metadata.
fn sort_value<'a>(doc: &'a Document, key: &str, segments: &[PathSegment]) -> Option<Cow<'a, Value>> {
    if key == DEFAULT_SORT_KEY {
        return Some(Cow::Owned(Value::String(doc.path().to_string())));
    }
    lookup(&doc.metadata, segments).map(Cow::Borrowed)
}

/// Whether a metadata value counts as present for ordering purposes
///
/// `null`, `false`, `0` and the empty string are falsy, as is a missing value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Ascending comparison of two optional metadata values.
///
/// Falsy or missing values are equal to each other and less than any truthy
/// value. Numbers compare numerically and strings lexically; values of
/// different types are ordered by type, and arrays or objects compare equal.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| is_truthy(v));
    let b = b.filter(|v| is_truthy(v));

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or_default();
                let y = y.as_f64().unwrap_or_default();
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}
