//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a
//! `.collections.yaml` configuration file without reading any documents.
//!
//! ## Functionality
//!
//! - **Configuration Parsing**: Parses the configuration file and reports
//!   malformed option shapes.
//! - **Option Normalization**: Normalizes every collection on its own, so all
//!   bad sort specifications, limits, patterns and metadata files are
//!   reported in one pass instead of stopping at the first.
//! - **Warnings**: Flags collections without a pattern, which only gain
//!   members through document front matter.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ssg_collections::defaults::DEFAULT_CONFIG_FILENAME;
use ssg_collections::loader::FileLoader;
use ssg_collections::output::{emoji, OutputConfig};
use ssg_collections::path::GlobMatcher;
use ssg_collections::phases::normalize;

/// Validate a .collections.yaml configuration file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the .collections.yaml configuration file to validate.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILENAME,
        env = "SSG_COLLECTIONS_CONFIG"
    )]
    pub config: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config_path = &args.config;
    println!(
        "{} Validating configuration: {}",
        emoji(&out, "🔍", "[SCAN]"),
        config_path.display()
    );

    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!(
                "{} Configuration file parsed successfully",
                emoji(&out, "✅", "[OK]")
            );
            config
        }
        Err(e) => {
            println!(
                "{} Configuration parsing failed: {}",
                emoji(&out, "❌", "[ERR]"),
                e
            );
            return Err(anyhow::anyhow!("Configuration parsing failed: {}", e));
        }
    };

    println!("\n{} Configuration Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Configured collections: {}", config.len());

    let loader = FileLoader::new(super::config_base_dir(config_path));

    let mut has_warnings = false;
    let mut has_errors = false;

    println!(
        "\n{} Normalizing collection options...",
        emoji(&out, "🔄", "[CHECK]")
    );
    for (name, options) in config.iter() {
        match normalize::normalize_collection(name, options, &GlobMatcher, &loader) {
            Ok(spec) => {
                let sort = match (spec.sort.key(), spec.sort.order()) {
                    (Some(key), Some(order)) => format!("{}:{}", key, order),
                    _ => "custom".to_string(),
                };
                let limit = spec
                    .limit
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "none".to_string());
                println!(
                    "{} {}: sort {}, limit {}, refer {}",
                    emoji(&out, "✅", "[OK]"),
                    name,
                    sort,
                    limit,
                    spec.refer
                );
                if spec.pattern.is_empty() {
                    println!(
                        "{} {} has no pattern; only documents declaring it will be members",
                        emoji(&out, "⚠️", "[WARN]"),
                        name
                    );
                    has_warnings = true;
                }
            }
            Err(e) => {
                println!("{} {}", emoji(&out, "❌", "[ERR]"), e);
                has_errors = true;
            }
        }
    }

    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));

    if has_errors {
        println!(
            "{} Configuration has errors that must be fixed",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Configuration validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Configuration has warnings (strict mode enabled)",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!(
            "Configuration validation failed in strict mode"
        ));
    }

    if has_warnings {
        println!(
            "{} Configuration is valid but has warnings",
            emoji(&out, "⚠️", "[WARN]")
        );
    } else {
        println!("{} Configuration is valid", emoji(&out, "✅", "[OK]"));
    }

    Ok(())
}
