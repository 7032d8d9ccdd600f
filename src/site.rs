//! Site file set handed over by the static-site pipeline.
//!
//! Files are kept as an ordered sequence of `(path, SiteFile)` pairs so that
//! the generated index is a function of input order rather than of hash-map
//! iteration order.

use crate::error::ManifestError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// Pre-resolved link fields computed upstream for a rendered page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkPath {
    /// Directory portion of the page URL, including the trailing slash.
    #[serde(default)]
    pub dhref: String,
    /// File name portion of the page URL.
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinkPath {
    /// Link target as the client script builds it: `dhref` followed by `name`.
    pub fn href(&self) -> String {
        format!("{}{}", self.dhref, self.name)
    }
}

/// One file of the site as the pipeline sees it.
///
/// Only `layout`, `title`, `contents` and `path` are interpreted; every other
/// attribute is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Rendered contents (HTML for pages, source text for generated assets).
    #[serde(default)]
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<LinkPath>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SiteFile {
    /// A file holding only contents, as produced for generated assets.
    pub fn from_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_path(mut self, dhref: impl Into<String>, name: impl Into<String>) -> Self {
        self.path = Some(LinkPath {
            dhref: dhref.into(),
            name: name.into(),
            extra: Map::new(),
        });
        self
    }
}

/// Ordered collection of site files keyed by output-relative path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteFiles {
    entries: Vec<(String, SiteFile)>,
}

impl SiteFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&SiteFile> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, file)| file)
    }

    /// Insert a file. An existing entry at `path` is replaced in place and returned.
    pub fn insert(&mut self, path: impl Into<String>, file: SiteFile) -> Option<SiteFile> {
        let path = path.into();
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, slot)) => Some(std::mem::replace(slot, file)),
            None => {
                self.entries.push((path, file));
                None
            }
        }
    }

    /// Iterate over `(path, file)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SiteFile)> {
        self.entries.iter().map(|(path, file)| (path.as_str(), file))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Load a JSON manifest object `{ "<path>": SiteFile, ... }`, keeping document order.
    pub async fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ManifestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<P: Into<String>> FromIterator<(P, SiteFile)> for SiteFiles {
    fn from_iter<I: IntoIterator<Item = (P, SiteFile)>>(iter: I) -> Self {
        let mut files = Self::new();
        for (path, file) in iter {
            files.insert(path, file);
        }
        files
    }
}

impl IntoIterator for SiteFiles {
    type Item = (String, SiteFile);
    type IntoIter = std::vec::IntoIter<(String, SiteFile)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for SiteFiles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, file) in &self.entries {
            map.serialize_entry(path, file)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SiteFiles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SiteFilesVisitor;

        impl<'de> Visitor<'de> for SiteFilesVisitor {
            type Value = SiteFiles;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from output path to site file")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SiteFiles, A::Error> {
                let mut files = SiteFiles::new();
                while let Some((path, file)) = access.next_entry::<String, SiteFile>()? {
                    files.insert(path, file);
                }
                Ok(files)
            }
        }

        deserializer.deserialize_map(SiteFilesVisitor)
    }
}
