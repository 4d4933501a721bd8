//! The collections build stage
//!
//! [`Collections`] is the entry point hosts use: construct it once from a
//! [`CollectionsConfig`], then call [`Plugin::run`] on every build pass.

use std::path::PathBuf;

use log::debug;

use crate::config::{CollectionSpec, CollectionsConfig};
use crate::defaults::default_base_dir;
use crate::document::Files;
use crate::error::Result;
use crate::loader::{FileLoader, MetadataLoader};
use crate::metadata::Metadata;
use crate::path::{GlobMatcher, PatternMatcher};
use crate::phases::{normalize, orchestrator};

/// A build-pipeline stage operating on the document map and global metadata
pub trait Plugin {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run the stage over one build pass
    fn run(&self, files: &mut Files, metadata: &mut Metadata) -> Result<()>;

    /// Run the stage and report the outcome through a completion callback
    ///
    /// `done` is invoked exactly once, with `Ok(())` or the error that
    /// aborted the run.
    fn call<F>(&self, files: &mut Files, metadata: &mut Metadata, done: F)
    where
        F: FnOnce(Result<()>),
        Self: Sized,
    {
        done(self.run(files, metadata))
    }
}

/// Stage-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSettings {
    /// Directory metadata file references are resolved against
    pub base_dir: PathBuf,
    /// Also publish each collection under its bare name
    pub publish_bare: bool,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            publish_bare: true,
        }
    }
}

/// Groups documents into named, ordered, cross-linked collections
pub struct Collections {
    specs: Vec<CollectionSpec>,
    matcher: Box<dyn PatternMatcher>,
    publish_bare: bool,
}

impl Collections {
    /// Normalize `config` with the default glob matcher and file loader
    pub fn new(config: &CollectionsConfig, settings: StageSettings) -> Result<Self> {
        let loader = FileLoader::new(&settings.base_dir);
        Self::with_collaborators(config, &settings, Box::new(GlobMatcher), &loader)
    }

    /// Normalize `config` with caller-supplied collaborators
    pub fn with_collaborators(
        config: &CollectionsConfig,
        settings: &StageSettings,
        matcher: Box<dyn PatternMatcher>,
        loader: &dyn MetadataLoader,
    ) -> Result<Self> {
        let specs = normalize::execute(config, matcher.as_ref(), loader)?;
        debug!("Configured {} collections", specs.len());
        Ok(Self {
            specs,
            matcher,
            publish_bare: settings.publish_bare,
        })
    }

    /// Normalized specs for the configured collections, in declaration order
    ///
    /// Collections discovered from document metadata are not included; they
    /// are synthesized afresh on every run.
    pub fn specs(&self) -> &[CollectionSpec] {
        &self.specs
    }
}

impl Plugin for Collections {
    fn name(&self) -> &str {
        "collections"
    }

    fn run(&self, files: &mut Files, metadata: &mut Metadata) -> Result<()> {
        debug!("Running {} over {} documents", self.name(), files.len());
        orchestrator::execute(
            &self.specs,
            self.matcher.as_ref(),
            files,
            metadata,
            self.publish_bare,
        )
    }
}

impl std::fmt::Debug for Collections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collections")
            .field("specs", &self.specs)
            .field("publish_bare", &self.publish_bare)
            .finish_non_exhaustive()
    }
}
