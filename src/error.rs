//! # Error Handling
//!
//! This module defines the centralized error type for the collections stage.
//! It uses the `thiserror` library to describe every anticipated failure mode
//! with a descriptive message.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum representing all failures that can abort the
//!   stage. Variants carry the offending collection name, file path or
//!   configuration key so the message can be acted on directly.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! All failures are deterministic configuration or data problems. Nothing in
//! this crate retries, and conditions such as an empty collection or a missing
//! sort field are handled silently rather than reported here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for collection resolution
#[derive(Error, Debug)]
pub enum Error {
    /// A collection's options could not be normalized.
    ///
    /// Raised for malformed sort specifications, invalid limits, invalid glob
    /// patterns and unrecognized option shapes.
    #[error("Configuration error in collection '{collection}': {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        collection: String,
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A collection's external metadata file is missing, unreadable or does
    /// not contain a key/value object.
    #[error("Failed to load metadata for collection '{collection}' from {}: {message}", path.display())]
    MetadataLoad {
        collection: String,
        path: PathBuf,
        message: String,
    },

    /// The configuration document as a whole could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A source document could not be read into a document record.
    #[error("Source document error in {}: {message}", path.display())]
    Source { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] without a hint.
    pub fn configuration(collection: &str, message: impl Into<String>) -> Self {
        Error::Configuration {
            collection: collection.to_string(),
            message: message.into(),
            hint: None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
