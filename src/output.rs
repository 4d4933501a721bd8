//! Terminal styling for the `ls`, `tree` and `validate` commands.
//!
//! Colors and emoji are used only when the terminal supports them. `--color`
//! overrides detection; in `auto` mode `NO_COLOR`, `CLICOLOR=0`, `TERM=dumb`
//! or a non-TTY stdout turn them off, and `CLICOLOR_FORCE=1` turns them on.
//!
//! Without colors, `ssg-collections ls --long` prints plain blocks such as:
//!
//! ```text
//! [COLLECTION] posts (2)
//!   posts/second.md                  prev: -  next: posts/first.md
//!   posts/first.md                   prev: posts/second.md  next: -
//! ```

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag (`always`, `never` or `auto`) against the environment
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // NO_COLOR disables even when empty
        let disabled = env::var_os("NO_COLOR").is_some()
            || env::var("CLICOLOR").is_ok_and(|v| v == "0");
        if disabled {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// `emoji_str` on a color terminal, `plain` otherwise
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Render a collection name or section title, bold when colors are enabled.
pub fn heading(config: &OutputConfig, text: &str) -> String {
    if config.use_color {
        console::style(text).bold().to_string()
    } else {
        text.to_string()
    }
}

/// Render secondary detail such as link targets, dimmed when colors are enabled.
pub fn dim(config: &OutputConfig, text: &str) -> String {
    if config.use_color {
        console::style(text).dim().to_string()
    } else {
        text.to_string()
    }
}

/// Header line of a collection block, e.g. `[COLLECTION] posts (2)`
pub fn collection_header(config: &OutputConfig, name: &str, len: usize) -> String {
    format!(
        "{} {} ({})",
        emoji(config, "📚", "[COLLECTION]"),
        heading(config, name),
        len
    )
}

/// Neighbour summary of one member, `-` standing for a missing link
pub fn links_line(config: &OutputConfig, previous: Option<&str>, next: Option<&str>) -> String {
    dim(
        config,
        &format!(
            "prev: {}  next: {}",
            previous.unwrap_or("-"),
            next.unwrap_or("-")
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_emoji_helper() {
        assert_eq!(emoji(&OutputConfig::with_color(), "📚", "[COLLECTION]"), "📚");
        assert_eq!(
            emoji(&OutputConfig::without_color(), "📚", "[COLLECTION]"),
            "[COLLECTION]"
        );
    }

    #[test]
    fn test_plain_styles_without_color() {
        let config = OutputConfig::without_color();
        assert_eq!(heading(&config, "posts"), "posts");
        assert_eq!(dim(&config, "next: b.md"), "next: b.md");
    }

    #[test]
    fn test_collection_header() {
        let plain = OutputConfig::without_color();
        assert_eq!(collection_header(&plain, "posts", 2), "[COLLECTION] posts (2)");
        assert!(collection_header(&OutputConfig::with_color(), "posts", 2).starts_with("📚"));
    }

    #[test]
    fn test_links_line() {
        let plain = OutputConfig::without_color();
        assert_eq!(links_line(&plain, None, Some("b.md")), "prev: -  next: b.md");
        assert_eq!(links_line(&plain, Some("a.md"), None), "prev: a.md  next: -");
    }

    #[test]
    fn test_heading_keeps_text_with_color() {
        let rendered = heading(&OutputConfig::with_color(), "posts");
        assert!(rendered.contains("posts"));
    }
}
