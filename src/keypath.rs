//! Key path expressions for addressing nested document metadata
//!
//! Sort keys such as `date`, `meta.order` or `authors[0].name` are parsed once
//! into a sequence of [`PathSegment`]s and then resolved against each
//! document's metadata while sorting.

use serde_json::{Map, Value};

/// Represents a segment in a key path expression
///
/// Key paths like "authors[0].name" or "meta.published" are parsed into a
/// sequence of PathSegments for lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A named key for accessing object members
    Key(String),
    /// A numeric index for accessing array elements
    Index(usize),
}

/// Parse a key path string into segments
///
/// Supports:
/// - Dot notation: `meta.published.date`
/// - Bracket notation: `meta["published"]` or `meta['published']`
/// - Array indices: `authors[0]` or `authors[1].name`
/// - Escaped characters: `file\.name` (literal dot)
/// - Mixed: `series[0]["part.no"]`
///
/// # Examples
///
/// ```
/// use ssg_collections::keypath::{parse_key_path, PathSegment};
///
/// let segments = parse_key_path("authors[0].name");
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1], PathSegment::Index(0));
/// ```
pub fn parse_key_path(path: &str) -> Vec<PathSegment> {
    if path.trim().is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => {
                escaped = true;
            }
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }

                match chars.peek().copied() {
                    Some(quote_char @ ('"' | '\'')) => {
                        chars.next();
                        let mut key = String::new();
                        let mut bracket_escaped = false;

                        while let Some(ch) = chars.next() {
                            if bracket_escaped {
                                key.push(ch);
                                bracket_escaped = false;
                            } else if ch == '\\' {
                                bracket_escaped = true;
                            } else if ch == quote_char {
                                if chars.peek() == Some(&']') {
                                    chars.next();
                                    break;
                                }
                                key.push(ch);
                            } else {
                                key.push(ch);
                            }
                        }

                        segments.push(PathSegment::Key(key));
                    }
                    _ => {
                        let mut bracket_content = String::new();
                        for next_ch in chars.by_ref() {
                            if next_ch == ']' {
                                break;
                            }
                            bracket_content.push(next_ch);
                        }

                        let trimmed = bracket_content.trim();
                        if let Ok(idx) = trimmed.parse::<usize>() {
                            segments.push(PathSegment::Index(idx));
                        } else if !trimmed.is_empty() {
                            segments.push(PathSegment::Key(trimmed.to_string()));
                        }
                    }
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Key(current));
    }

    segments
}

/// Resolve parsed segments against a metadata map.
///
/// Returns `None` as soon as a segment is missing or addresses into a value of
/// the wrong shape.
pub fn lookup<'a>(metadata: &'a Map<String, Value>, segments: &[PathSegment]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = match first {
        PathSegment::Key(key) => metadata.get(key)?,
        PathSegment::Index(idx) => metadata.get(&idx.to_string())?,
    };

    for segment in rest {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
            (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx)?,
            (PathSegment::Index(idx), Value::Object(map)) => map.get(&idx.to_string())?,
            _ => return None,
        };
    }

    Some(current)
}
