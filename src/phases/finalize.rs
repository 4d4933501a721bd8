//! Collection finalization
//!
//! Orders, filters and truncates a group's members, then links adjacent
//! documents. Operations always run in this order: sort, filter, limit, link.

use log::{debug, trace};

use crate::collection::Collection;
use crate::document::{Document, Files, Links};
use crate::phases::membership::Group;

/// Finalize one group into a [`Collection`]
///
/// Links for this collection are cleared on every member first, so documents
/// dropped by the filter or the limit never keep stale links from a previous
/// run.
pub fn execute(group: &Group, files: &mut Files) -> Collection {
    let spec = &group.spec;

    let mut documents: Vec<&Document> = group
        .members
        .iter()
        .filter_map(|path| files.get(path))
        .collect();
    documents.sort_by(|a, b| spec.sort.compare(a, b));
    documents.retain(|doc| spec.accepts(doc));
    if let Some(limit) = spec.limit {
        documents.truncate(limit);
    }
    let items: Vec<String> = documents.iter().map(|doc| doc.path().to_string()).collect();

    debug!(
        "Collection {}: {} members, {} after filter and limit",
        spec.name,
        group.members.len(),
        items.len()
    );

    for path in &group.members {
        if let Some(document) = files.get_mut(path) {
            document.clear_links(&spec.name);
        }
    }

    if spec.refer {
        link(&spec.name, &items, files);
    }

    Collection::new(&spec.name, items, spec.metadata.clone())
}

/// Set previous/next/first/last links on every item of an ordered list
pub fn link(name: &str, items: &[String], files: &mut Files) {
    let first = items.first().cloned();
    let last = items.last().cloned();
    for (i, path) in items.iter().enumerate() {
        let links = Links {
            previous: i.checked_sub(1).map(|p| items[p].clone()),
            next: items.get(i + 1).cloned(),
            first: first.clone(),
            last: last.clone(),
        };
        trace!("Linking {} in {}: {:?}", path, name, links);
        if let Some(document) = files.get_mut(path) {
            document.set_links(name, links);
        }
    }
}
