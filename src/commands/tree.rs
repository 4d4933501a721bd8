//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays resolved
//! collections and their members in a hierarchical format.
//!
//! ## Functionality
//!
//! - **Collection Tree Visualization**: One branch per collection, members in
//!   final order
//! - **Metadata Display**: Optionally shows collection-level metadata keys
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::path::PathBuf;

use ssg_collections::defaults::{DEFAULT_CONFIG_FILENAME, DEFAULT_SOURCE_DIR};
use ssg_collections::metadata::Metadata;

/// Display collections and their members as a tree
#[derive(Args, Debug)]
pub struct TreeArgs {
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

    /// Also show each collection's metadata keys.
    #[arg(long)]
    pub metadata: bool,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let (_, metadata) = super::resolve(&args.config, &args.source)?;

    let tree_root = build_tree(&metadata, &args.source.display().to_string(), args.metadata);
    print_tree(&tree_root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

/// Build the display tree from published collections
fn build_tree(metadata: &Metadata, root_label: &str, show_metadata: bool) -> TreeNode {
    let children = metadata
        .collections()
        .iter()
        .map(|collection| {
            let mut children: Vec<TreeNode> = Vec::new();
            if show_metadata {
                if let Some(meta) = collection.metadata() {
                    children.extend(meta.iter().map(|(key, value)| TreeNode::leaf(format!("@{} = {}", key, value))));
                }
            }
            children.extend(collection.items().iter().map(|path| TreeNode::leaf(path.clone())));
            TreeNode {
                label: format!("{} ({})", collection.name(), collection.len()),
                children,
            }
        })
        .collect();

    TreeNode {
        label: root_label.to_string(),
        children,
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: vec![],
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
