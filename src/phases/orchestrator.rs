//! Orchestrator for one build pass
//!
//! Coordinates membership, finalization and publishing over a set of already
//! normalized specs.

use super::{phase2, phase3, phase4};
use crate::collection::Collection;
use crate::config::CollectionSpec;
use crate::document::Files;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::path::PatternMatcher;

/// Execute one build pass (Phases 2-4)
///
/// 1. Resolve membership, discovering collections declared only by documents
/// 2. Finalize every collection in declaration order
/// 3. Publish the results into `metadata`
///
/// A failure aborts the pass before anything is published.
pub fn execute(
    specs: &[CollectionSpec],
    matcher: &dyn PatternMatcher,
    files: &mut Files,
    metadata: &mut Metadata,
    publish_bare: bool,
) -> Result<()> {
    // Phase 2: Membership
    let groups = phase2::execute(specs, matcher, files)?;

    // Phase 3: Finalization
    let collections: Vec<Collection> = groups
        .iter()
        .map(|group| phase3::execute(group, files))
        .collect();

    // Phase 4: Publishing
    phase4::execute(collections, metadata, publish_bare);

    Ok(())
}
