//! Collection publishing
//!
//! Writes finalized collections into the global [`Metadata`]: always into the
//! `collections` namespace, and under the bare collection name when enabled.

use std::sync::Arc;

use log::{debug, warn};

use crate::collection::Collection;
use crate::metadata::{Entry, Metadata};

/// Publish collections in declaration order
///
/// Published collections are reset first, namespaced and bare, so collections
/// that no longer exist do not linger from an earlier run. A bare entry replacing a plain global value is
/// reported with a warning.
pub fn execute(collections: Vec<Collection>, metadata: &mut Metadata, publish_bare: bool) {
    metadata.reset_collections();

    for collection in collections {
        let collection = Arc::new(collection);
        debug!(
            "Publishing collection {} with {} items",
            collection.name(),
            collection.len()
        );
        metadata.set_collection(Arc::clone(&collection));

        if publish_bare {
            let name = collection.name().to_string();
            if let Some(Entry::Value(_)) = metadata.set_bare(collection) {
                warn!(
                    "Collection {} overwrites an existing global metadata value",
                    name
                );
            }
        }
    }
}
