//! Index payload: the searchable entry list and the title-keyed result map.

use crate::extract::ExtractedDocument;
use crate::site::{LinkPath, SiteFile};
use ahash::AHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One searchable document as fed to the client full-text engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    /// Body text with tags and line breaks removed.
    pub contents: String,
}

/// Original file attributes plus the derived excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(flatten)]
    pub file: SiteFile,
    pub excerpt: String,
}

impl ResultRecord {
    /// Build a record from a page, dropping any `excerpt` attribute the page already had.
    pub fn new(mut file: SiteFile, excerpt: String) -> Self {
        file.extra.remove("excerpt");
        Self { file, excerpt }
    }

    pub fn link(&self) -> Option<&LinkPath> {
        self.file.path.as_ref()
    }

    /// Result link target; empty when the page has no resolved path.
    pub fn href(&self) -> String {
        self.link().map(LinkPath::href).unwrap_or_default()
    }
}

/// Two documentation pages mapped to the same title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCollision {
    pub title: String,
    /// Path of the page whose record was overwritten.
    pub first: String,
    /// Path of the page whose record now occupies the title.
    pub second: String,
}

/// Title → record map with JavaScript object semantics.
///
/// Overwriting a title replaces its record but keeps the key's original
/// position, so serialization order matches the client's view of the object.
#[derive(Debug, Clone, Default)]
pub struct ResultMap {
    entries: Vec<(String, ResultRecord)>,
    sources: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Returns the source path of the record it replaced, if any.
    pub fn insert(&mut self, title: String, source: String, record: ResultRecord) -> Option<String> {
        if let Some(&position) = self.positions.get(&title) {
            self.entries[position].1 = record;
            return Some(std::mem::replace(&mut self.sources[position], source));
        }
        self.positions.insert(title.clone(), self.entries.len());
        self.entries.push((title, record));
        self.sources.push(source);
        None
    }

    pub fn get(&self, title: &str) -> Option<&ResultRecord> {
        self.positions.get(title).map(|&i| &self.entries[i].1)
    }

    /// Source path of the record currently stored under `title`.
    pub fn source_of(&self, title: &str) -> Option<&str> {
        self.positions.get(title).map(|&i| self.sources[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(title, _)| title.as_str())
    }
}

impl PartialEq for ResultMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Serialize for ResultMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, record) in &self.entries {
            map.serialize_entry(title, record)?;
        }
        map.end()
    }
}

/// Everything the client script needs, rebuilt from scratch every build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexPayload {
    pub entries: Vec<IndexEntry>,
    pub results: ResultMap,
    pub collisions: Vec<TitleCollision>,
}

impl IndexPayload {
    /// Serialize the entry list as a JSON array literal.
    pub fn entries_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }

    /// Serialize the result map as a JSON object literal.
    pub fn results_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.results)
    }
}

/// Accumulates extracted documents in the order they are pushed.
#[derive(Debug, Default)]
pub struct PayloadBuilder {
    payload: IndexPayload,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document: always a new entry, last-wins in the result map.
    pub fn push(&mut self, document: ExtractedDocument) {
        let ExtractedDocument {
            source,
            title,
            excerpt,
            body,
            file,
        } = document;

        self.payload.entries.push(IndexEntry {
            title: title.clone(),
            contents: body,
        });

        let record = ResultRecord::new(file, excerpt);
        if let Some(first) = self
            .payload
            .results
            .insert(title.clone(), source.clone(), record)
        {
            self.payload.collisions.push(TitleCollision {
                title,
                first,
                second: source,
            });
        }
    }

    pub fn finish(self) -> IndexPayload {
        self.payload
    }
}

impl Extend<ExtractedDocument> for PayloadBuilder {
    fn extend<I: IntoIterator<Item = ExtractedDocument>>(&mut self, iter: I) {
        for document in iter {
            self.push(document);
        }
    }
}
