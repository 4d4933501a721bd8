//! Glob matching for collection patterns
//!
//! Collections select their members with glob patterns matched against
//! document paths. A pattern list may mix positive patterns with negations
//! (prefixed with `!`), and patterns may use `{a,b}` alternatives which are
//! expanded before compilation.

use glob::{MatchOptions, Pattern};

/// Match options used for every collection pattern.
///
/// `*` never crosses a `/`, so `*.md` only matches top-level documents and
/// `**/*.md` is needed to descend.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Match a single path against a glob pattern
pub fn glob_match(pattern: &str, path: &str) -> Result<bool, glob::PatternError> {
    PatternSet::new(&[pattern.to_string()]).map(|set| set.matches(path))
}

/// Expand `{a,b}` alternatives in a glob pattern.
///
/// Nested groups are expanded recursively. Unbalanced braces are left
/// untouched so that the glob compiler can report them.
///
/// ```
/// use ssg_collections::path::expand_braces;
///
/// assert_eq!(expand_braces("{one,two}.md"), vec!["one.md", "two.md"]);
/// ```
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (offset, ch) in pattern[open..].char_indices() {
        let idx = open + offset;
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(idx),
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    let mut alternatives = Vec::new();
    let mut start = open + 1;
    for split in splits.into_iter().chain(std::iter::once(close)) {
        alternatives.push(&pattern[start..split]);
        start = split + 1;
    }

    alternatives
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}

/// A compiled list of positive and negated glob patterns
///
/// A path matches the set when it matches at least one positive pattern and
/// none of the negated ones. A set containing only negations matches nothing.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PatternSet {
    /// Compile a list of patterns
    pub fn new(patterns: &[String]) -> Result<Self, glob::PatternError> {
        let mut set = PatternSet::default();
        for raw in patterns {
            let (negated, body) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, raw.as_str()),
            };
            for expanded in expand_braces(body) {
                let compiled = Pattern::new(expanded.trim_start_matches("./"))?;
                if negated {
                    set.exclude.push(compiled);
                } else {
                    set.include.push(compiled);
                }
            }
        }
        Ok(set)
    }

    /// True when the set has no positive pattern
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    /// Check whether a path is selected by this set
    pub fn matches(&self, path: &str) -> bool {
        self.include
            .iter()
            .any(|p| p.matches_with(path, MATCH_OPTIONS))
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_with(path, MATCH_OPTIONS))
    }
}

/// The glob-matching primitive used to resolve pattern membership
///
/// Implementations receive a collection's raw pattern list and the candidate
/// document paths and return the matched paths in candidate order.
pub trait PatternMatcher: Send + Sync {
    /// Validate a pattern list without matching anything.
    fn check(&self, _patterns: &[String]) -> Result<(), String> {
        Ok(())
    }

    /// Return the candidates selected by `patterns`.
    fn match_paths(&self, patterns: &[String], candidates: &[&str]) -> Result<Vec<String>, String>;
}

/// Default [`PatternMatcher`] backed by the `glob` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcher;

impl PatternMatcher for GlobMatcher {
    fn check(&self, patterns: &[String]) -> Result<(), String> {
        PatternSet::new(patterns)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn match_paths(&self, patterns: &[String], candidates: &[&str]) -> Result<Vec<String>, String> {
        let set = PatternSet::new(patterns).map_err(|e| e.to_string())?;
        Ok(candidates
            .iter()
            .filter(|path| set.matches(path))
            .map(|path| path.to_string())
            .collect())
    }
}

/// Normalize a document path to forward slashes without a leading `./`
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    unified.trim_start_matches("./").to_string()
}
