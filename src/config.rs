//! Build configuration loaded from TOML.
//!
//! Every field has a default matching the documentation site conventions, so
//! an empty file (or no file at all) gives a working setup.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout identifier that marks a page as documentation.
pub const DEFAULT_LAYOUT: &str = "docs.hbs";
/// Title used for documentation pages that carry no title attribute.
pub const DEFAULT_TITLE: &str = "Documentation";
/// Virtual path of the generated client script.
pub const DEFAULT_OUTPUT_PATH: &str = "js/docs-search.js";
/// Route every search submission is funneled through.
pub const DEFAULT_SEARCH_ROUTE: &str = "/docs/search";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Pages whose `layout` equals this value are indexed.
    pub layout: String,
    pub default_title: String,
    /// CSS selector of the region whose text becomes the searchable body.
    pub content_selector: String,
    /// CSS selector whose first match provides the excerpt.
    pub excerpt_selector: String,
    /// Site-relative path the script is written to.
    pub output_path: String,
    /// Fail the build when two documentation pages share a title.
    pub strict_titles: bool,
    pub client: ClientSettings,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            content_selector: ".docs-content".to_string(),
            excerpt_selector: "p".to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            strict_titles: false,
            client: ClientSettings::default(),
        }
    }
}

/// Settings consumed by the browser script (and its Rust model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSettings {
    pub search_route: String,
    pub title_boost: u32,
    pub contents_boost: u32,
    /// HTML-escape titles and excerpts before inserting them into result markup.
    pub escape_results: bool,
    pub markup: Markup,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            search_route: DEFAULT_SEARCH_ROUTE.to_string(),
            title_boost: 10,
            contents_boost: 1,
            escape_results: false,
            markup: Markup::default(),
        }
    }
}

/// Element ids the host page must provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markup {
    pub query_label: String,
    pub search_input: String,
    pub results: String,
    pub form: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            query_label: "searchQuery".to_string(),
            search_input: "searchInput".to_string(),
            results: "searchResults".to_string(),
            form: "searchForm".to_string(),
        }
    }
}

impl SearchConfig {
    /// Parse a configuration from TOML text. `origin` is only used in errors.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load and validate a configuration file.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
        let config = Self::from_toml(&content, path)?;
        config.validate()?;
        tracing::debug!("Loaded search config from {}", path.display());
        Ok(config)
    }

    /// Check the field values that do not depend on an HTML backend.
    ///
    /// Selectors are checked when an extractor compiles them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.trim().is_empty() {
            return Err(invalid("layout", "must not be empty"));
        }
        if self.content_selector.trim().is_empty() {
            return Err(invalid("content_selector", "must not be empty"));
        }
        if self.excerpt_selector.trim().is_empty() {
            return Err(invalid("excerpt_selector", "must not be empty"));
        }
        if self.output_path.trim().is_empty() {
            return Err(invalid("output_path", "must not be empty"));
        }
        if self.output_path.starts_with('/') || Path::new(&self.output_path).is_absolute() {
            return Err(invalid("output_path", "must be relative to the site root"));
        }
        if self
            .output_path
            .split(['/', '\\'])
            .any(|segment| segment == "..")
        {
            return Err(invalid("output_path", "must not leave the site root"));
        }
        if !self.client.search_route.starts_with('/') {
            return Err(invalid("client.search_route", "must start with '/'"));
        }
        if self.client.title_boost == 0 || self.client.contents_boost == 0 {
            return Err(invalid("client boost", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
