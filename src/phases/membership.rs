//! Membership resolution
//!
//! Decides which collections every document belongs to and gathers each
//! collection's unordered member list.
//!
//! ## Ordering contract
//!
//! A document's final membership lists the names it declares in its own
//! metadata first, in declaration order, followed by the collections whose
//! patterns match it, in collection-declaration order. Duplicates collapse to
//! their first occurrence. Member lists are built from these final per-document
//! lists, so a document's `collection` field and the collections it appears in
//! always agree.

use std::collections::HashMap;

use log::debug;

use crate::config::CollectionSpec;
use crate::document::Files;
use crate::error::{Error, Result};
use crate::path::PatternMatcher;

/// A collection spec together with its unordered members
#[derive(Debug, Clone)]
pub struct Group {
    /// The normalized spec
    pub spec: CollectionSpec,
    /// Member paths in document-map order
    pub members: Vec<String>,
}

/// Collect collection names declared by documents but not configured.
///
/// Names are returned in first-seen order, scanning documents by path.
pub fn discover_names(files: &Files, specs: &[CollectionSpec]) -> Vec<String> {
    let mut discovered: Vec<String> = Vec::new();
    for (_, document) in files.iter() {
        for name in document.declared_collections() {
            let known = specs.iter().any(|s| s.name == name) || discovered.contains(&name);
            if !known {
                discovered.push(name);
            }
        }
    }
    discovered
}

/// Resolve membership for every document and group members per collection
///
/// Dynamically discovered collections are appended after the configured ones
/// with default options. Every document's membership is rewritten.
pub fn execute(
    configured: &[CollectionSpec],
    matcher: &dyn PatternMatcher,
    files: &mut Files,
) -> Result<Vec<Group>> {
    let mut specs: Vec<CollectionSpec> = configured.to_vec();
    for name in discover_names(files, configured) {
        specs.push(CollectionSpec::with_defaults(&name));
    }

    debug!(
        "Identified {} collections: {}",
        specs.len(),
        specs
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );

    let mut membership: Vec<(String, Vec<String>)> = files
        .iter()
        .map(|(path, doc)| (path.to_string(), doc.declared_collections()))
        .collect();

    let paths: Vec<&str> = membership.iter().map(|(p, _)| p.as_str()).collect();
    let mut matched_by_spec: Vec<Vec<String>> = Vec::with_capacity(specs.len());
    for spec in &specs {
        if spec.pattern.is_empty() {
            matched_by_spec.push(Vec::new());
            continue;
        }
        let matched = matcher
            .match_paths(&spec.pattern, &paths)
            .map_err(|message| Error::Configuration {
                collection: spec.name.clone(),
                message: format!("Pattern matching failed: {}", message),
                hint: None,
            })?;
        debug!("Pattern of collection {} matched {} documents", spec.name, matched.len());
        matched_by_spec.push(matched);
    }

    let index: HashMap<&str, usize> = membership
        .iter()
        .enumerate()
        .map(|(i, (path, _))| (path.as_str(), i))
        .collect();
    let mut appended: Vec<(usize, String)> = Vec::new();
    for (spec, matched) in specs.iter().zip(&matched_by_spec) {
        for path in matched {
            if let Some(&i) = index.get(path.as_str()) {
                appended.push((i, spec.name.clone()));
            }
        }
    }
    drop(index);
    for (i, name) in appended {
        let names = &mut membership[i].1;
        if !names.contains(&name) {
            names.push(name);
        }
    }

    let position: HashMap<&str, usize> = specs
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.as_str(), i))
        .collect();
    let mut members: Vec<Vec<String>> = vec![Vec::new(); specs.len()];
    for (path, names) in &membership {
        for name in names {
            if let Some(&i) = position.get(name.as_str()) {
                members[i].push(path.clone());
            }
        }
    }
    drop(position);

    for (path, names) in membership {
        if let Some(document) = files.get_mut(&path) {
            document.set_membership(names);
        }
    }

    Ok(specs
        .into_iter()
        .zip(members)
        .map(|(spec, members)| Group { spec, members })
        .collect())
}
