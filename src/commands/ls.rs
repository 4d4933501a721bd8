//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which reads a source directory,
//! resolves collections according to a `.collections.yaml` configuration and
//! lists every collection with its members in final order.
//!
//! ## Functionality
//!
//! - **Collection Listing**: One block per collection, in declaration order,
//!   followed by collections discovered from document front matter
//! - **Detailed Output**: Optional long format showing previous/next links
//! - **JSON Output**: Prints the published global metadata as JSON
//! - **Filtering**: Restrict output to one collection
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ssg_collections::collection::Collection;
use ssg_collections::defaults::{DEFAULT_CONFIG_FILENAME, DEFAULT_SOURCE_DIR};
use ssg_collections::document::Files;
use ssg_collections::output::{collection_header, dim, links_line, OutputConfig};

/// Resolve collections and list their members
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the .collections.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILENAME,
        env = "SSG_COLLECTIONS_CONFIG"
    )]
    pub config: PathBuf,

    /// Directory holding the source documents.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source: PathBuf,

    /// Only list the named collection.
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Use long listing format showing previous/next links.
    #[arg(short, long)]
    pub long: bool,

    /// Print the published metadata as JSON.
    #[arg(long, conflicts_with = "long")]
    pub json: bool,
}

/// Execute the `ls` command.
///
/// Runs the collections stage over the source directory and prints the
/// result without writing anything to disk.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: LsArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let (files, metadata) = super::resolve(&args.config, &args.source)?;

    let selected: Vec<&Collection> = match &args.collection {
        Some(name) => match metadata.collection(name) {
            Some(collection) => vec![collection.as_ref()],
            None => {
                let known: Vec<&str> = metadata.collections().iter().map(|c| c.name()).collect();
                return Err(ssg_collections::suggestions::unknown_collection(name, &known));
            }
        },
        None => metadata.collections().iter().map(|c| c.as_ref()).collect(),
    };

    if args.json {
        let rendered = match &args.collection {
            Some(_) => selected
                .first()
                .map(|c| c.to_json(&files))
                .unwrap_or_default(),
            None => metadata.to_json(&files),
        };
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No collections resolved.");
        return Ok(());
    }

    for collection in &selected {
        print!("{}", format_collection(collection, &files, args.long, &out));
    }

    let total: usize = selected.iter().map(|c| c.len()).sum();
    println!();
    println!("{} collection(s), {} item(s)", selected.len(), total);

    Ok(())
}

/// Render one collection block
fn format_collection(collection: &Collection, files: &Files, long: bool, out: &OutputConfig) -> String {
    let mut block = format!(
        "{}\n",
        collection_header(out, collection.name(), collection.len())
    );

    if collection.is_empty() {
        block.push_str(&format!("  {}\n", dim(out, "(empty)")));
        return block;
    }

    for path in collection.items() {
        if !long {
            block.push_str(&format!("  {}\n", path));
            continue;
        }
        let links = files.get(path).and_then(|doc| doc.links(collection.name()));
        let previous = links.and_then(|l| l.previous.as_deref());
        let next = links.and_then(|l| l.next.as_deref());
        block.push_str(&format!("  {:<32} {}\n", path, links_line(out, previous, next)));
    }
    block
}
