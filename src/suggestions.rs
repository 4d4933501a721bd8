//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ssg_collections::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

/// Generate an error for when the configuration file is not found.
///
/// Includes hints about:
/// - Creating a new config file
/// - Using the -c/--config flag
/// - Using the SSG_COLLECTIONS_CONFIG environment variable
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .collections.yaml file in your project root\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set SSG_COLLECTIONS_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for when the source directory does not exist.
pub fn source_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Source directory not found: {path}\n\n\
         hint: Use -s/--source to point at the directory holding your documents",
        path = path.display()
    )
}

/// Hint for an unknown collection option, suggesting the closest valid key.
pub fn unknown_option_hint(option: &str, valid: &[&str]) -> String {
    let did_you_mean = find_similar(option, valid)
        .map(|s| format!("Did you mean '{s}'? "))
        .unwrap_or_default();
    format!("{did_you_mean}Valid options are: {}", valid.join(", "))
}

/// Generate an error for a collection requested on the command line that
/// was not resolved.
pub fn unknown_collection(name: &str, known: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(name, known)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();
    let available = if known.is_empty() {
        "none".to_string()
    } else {
        known.join(", ")
    };

    anyhow::anyhow!(
        "Unknown collection: {name}{did_you_mean}\n\n\
         Resolved collections are: {available}"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
pub fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
