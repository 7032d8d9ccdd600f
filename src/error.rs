//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for moonsearch glue code.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` in the binary and persistence helpers.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a configuration file cannot be loaded or is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Configuration file is not valid TOML or has the wrong shape.
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// A field holds a value the build cannot work with.
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
    /// A CSS selector in the configuration does not parse.
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

/// Error returned when a site file manifest cannot be loaded.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read site manifest at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse site manifest at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error that aborts a search index build. No partial output is written.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Two documentation pages share a title while `strict_titles` is enabled.
    #[error("duplicate documentation title '{title}' in '{first}' and '{second}'")]
    TitleCollision {
        title: String,
        first: String,
        second: String,
    },
    /// The payload could not be serialized into the script.
    #[error("failed to serialize search payload: {0}")]
    Serialize(#[from] serde_json::Error),
}
