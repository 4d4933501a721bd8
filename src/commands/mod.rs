//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `ssg-collections` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Commands that resolve collections share [`load_stage`] and [`resolve`].

pub mod completions;
pub mod ls;
pub mod tree;
pub mod validate;

use anyhow::Result;
use std::path::{Path, PathBuf};

use ssg_collections::config::{self, CollectionsConfig};
use ssg_collections::document::Files;
use ssg_collections::metadata::Metadata;
use ssg_collections::source;
use ssg_collections::stage::{Collections, Plugin, StageSettings};

/// Load the configuration file, with a hint when it is missing
pub fn load_config(config_path: &Path) -> Result<CollectionsConfig> {
    if !config_path.exists() {
        return Err(ssg_collections::suggestions::config_not_found(config_path));
    }
    config::from_file(config_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
        )
    })
}

/// Directory metadata files resolve against: the config file's parent
pub fn config_base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(ssg_collections::defaults::default_base_dir)
}

/// Build a stage whose metadata files resolve next to the config file
pub fn load_stage(config_path: &Path, publish_bare: bool) -> Result<Collections> {
    let config = load_config(config_path)?;
    let settings = StageSettings {
        base_dir: config_base_dir(config_path),
        publish_bare,
    };
    Collections::new(&config, settings)
        .map_err(|e| anyhow::anyhow!("Invalid collection configuration: {}", e))
}

/// Read the source directory and run the stage over it
pub fn resolve(config_path: &Path, source_dir: &Path) -> Result<(Files, Metadata)> {
    let stage = load_stage(config_path, true)?;
    if !source_dir.is_dir() {
        return Err(ssg_collections::suggestions::source_not_found(source_dir));
    }
    let mut files = source::read_dir(source_dir)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", source_dir.display(), e))?;
    let mut metadata = Metadata::new();
    stage
        .run(&mut files, &mut metadata)
        .map_err(|e| anyhow::anyhow!("Failed to resolve collections: {}", e))?;
    Ok((files, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_base_dir() {
        assert_eq!(
            config_base_dir(Path::new("site/.collections.yaml")),
            PathBuf::from("site")
        );
        assert_eq!(
            config_base_dir(Path::new(".collections.yaml")),
            ssg_collections::defaults::default_base_dir()
        );
    }
}
