//! Field-weighted inverted index with BM25 scoring.
//!
//! This is the Rust model of the browser's full-text engine: one reference
//! key per document, any number of weighted fields, OR-combined query terms.

use super::tokenize::{normalize, tokenize_and_stem};
use crate::payload::IndexEntry;
use ahash::AHashMap;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{BTreeMap, HashMap};

/// BM25 term frequency saturation.
const K1: f32 = 1.2;
/// BM25 field length normalization.
const B: f32 = 0.75;

/// An indexed field and its score multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub boost: f32,
}

impl Field {
    pub fn new(name: impl Into<String>, boost: f32) -> Self {
        Self {
            name: name.into(),
            boost,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Reference key of the matching document (its title).
    pub reference: String,
    pub score: f32,
}

#[derive(Debug, Clone, Copy)]
struct Posting {
    doc: usize,
    field: usize,
    tf: u32,
}

#[derive(Debug, Clone, Default)]
struct TermEntry {
    /// Number of distinct documents containing the term in any field
    doc_freq: usize,
    postings: Vec<Posting>,
}

/// A single parsed query term.
#[derive(Debug, Clone, PartialEq)]
struct Clause {
    field: Option<usize>,
    term: String,
    prefix: bool,
}

/// Builder for accumulating term frequencies before scoring statistics are fixed.
pub struct IndexBuilder {
    fields: Vec<Field>,
    refs: Vec<String>,
    /// Flat map from (term, doc, field) → raw term count
    term_docs: HashMap<(String, usize, usize), u32>,
    /// Token count per document per field
    field_lengths: Vec<Vec<u32>>,
    stemmer: Stemmer,
}

impl IndexBuilder {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            refs: Vec::new(),
            term_docs: HashMap::new(),
            field_lengths: Vec::new(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Add a document. `values` are matched to fields by position; missing values are empty.
    pub fn add(&mut self, reference: impl Into<String>, values: &[&str]) {
        let doc = self.refs.len();
        self.refs.push(reference.into());

        let mut lengths = vec![0; self.fields.len()];
        for (field, text) in values.iter().take(self.fields.len()).enumerate() {
            let words = tokenize_and_stem(text, &self.stemmer);
            lengths[field] = words.len() as u32;
            for word in words {
                *self.term_docs.entry((word, doc, field)).or_insert(0) += 1;
            }
        }
        self.field_lengths.push(lengths);
    }

    /// Fix document statistics and produce the searchable index.
    pub fn finalize(self) -> SearchIndex {
        let start = std::time::Instant::now();
        let total_pairs = self.term_docs.len();

        let mut terms: BTreeMap<String, TermEntry> = BTreeMap::new();
        for ((term, doc, field), tf) in self.term_docs {
            terms
                .entry(term)
                .or_default()
                .postings
                .push(Posting { doc, field, tf });
        }

        for entry in terms.values_mut() {
            entry.postings.sort_by_key(|p| (p.doc, p.field));
            let mut docs: Vec<usize> = entry.postings.iter().map(|p| p.doc).collect();
            docs.dedup();
            entry.doc_freq = docs.len();
        }

        let doc_count = self.refs.len().max(1) as f32;
        let avg_field_lengths = (0..self.fields.len())
            .map(|field| {
                let total: u32 = self.field_lengths.iter().map(|l| l[field]).sum();
                (total as f32 / doc_count).max(1.0)
            })
            .collect();

        let index = SearchIndex {
            fields: self.fields,
            refs: self.refs,
            terms,
            field_lengths: self.field_lengths,
            avg_field_lengths,
        };

        tracing::debug!(
            "Built client search model: {} unique terms, {} documents, {} term-field pairs in {:?}",
            index.term_count(),
            index.document_count(),
            total_pairs,
            start.elapsed()
        );

        index
    }
}

/// A searchable, immutable index.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    fields: Vec<Field>,
    refs: Vec<String>,
    terms: BTreeMap<String, TermEntry>,
    field_lengths: Vec<Vec<u32>>,
    avg_field_lengths: Vec<f32>,
}

impl SearchIndex {
    /// Index payload entries the way the client script does: reference `title`,
    /// fields `title` and `contents` with the given boosts.
    pub fn from_entries(entries: &[IndexEntry], title_boost: f32, contents_boost: f32) -> Self {
        let mut builder = IndexBuilder::new(vec![
            Field::new("title", title_boost),
            Field::new("contents", contents_boost),
        ]);
        for entry in entries {
            builder.add(entry.title.clone(), &[&entry.title, &entry.contents]);
        }
        builder.finalize()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn document_count(&self) -> usize {
        self.refs.len()
    }

    fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Split a query string into clauses.
    ///
    /// Words are OR-combined. `field:word` restricts a word to one field and a
    /// trailing `*` turns a word into an unstemmed prefix match.
    fn parse(&self, query: &str, stemmer: &Stemmer) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for word in query.split_whitespace() {
            let (field, rest) = match word.split_once(':') {
                Some((name, rest)) => match self.field_index(name) {
                    Some(field) => (Some(field), rest),
                    None => (None, word),
                },
                None => (None, word),
            };

            if let Some(stem) = rest.strip_suffix('*') {
                if let Some(term) = normalize(stem) {
                    clauses.push(Clause {
                        field,
                        term,
                        prefix: true,
                    });
                }
                continue;
            }

            for term in tokenize_and_stem(rest, stemmer) {
                clauses.push(Clause {
                    field,
                    term,
                    prefix: false,
                });
            }
        }

        clauses
    }

    fn idf(&self, doc_freq: usize) -> f32 {
        let n = self.refs.len() as f32;
        let df = doc_freq as f32;
        (1.0 + (n - df + 0.5).abs() / (df + 0.5)).ln()
    }

    fn matching_terms<'s>(&'s self, clause: &'s Clause) -> Vec<&'s TermEntry> {
        if clause.prefix {
            self.terms
                .range(clause.term.clone()..)
                .take_while(|(term, _)| term.starts_with(&clause.term))
                .map(|(_, entry)| entry)
                .collect()
        } else {
            self.terms.get(&clause.term).into_iter().collect()
        }
    }

    /// Run a query. Results are sorted by score (highest first), ties by
    /// insertion order. A query with no usable terms matches nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let stemmer = Stemmer::create(Algorithm::English);
        let clauses = self.parse(query, &stemmer);

        if clauses.is_empty() {
            return vec![];
        }

        let mut combined_scores: AHashMap<usize, f32> = AHashMap::new();

        for clause in &clauses {
            for entry in self.matching_terms(clause) {
                let idf = self.idf(entry.doc_freq);
                for posting in &entry.postings {
                    if clause.field.is_some_and(|f| f != posting.field) {
                        continue;
                    }
                    let tf = posting.tf as f32;
                    let length = self.field_lengths[posting.doc][posting.field] as f32;
                    let avg = self.avg_field_lengths[posting.field];
                    let saturation = (tf * (K1 + 1.0)) / (tf + K1 * (1.0 - B + B * length / avg));
                    let score = idf * saturation * self.fields[posting.field].boost;
                    *combined_scores.entry(posting.doc).or_insert(0.0) += score;
                }
            }
        }

        let mut results: Vec<_> = combined_scores.into_iter().collect();
        results.sort_by(|(doc_a, a), (doc_b, b)| b.total_cmp(a).then(doc_a.cmp(doc_b)));

        results
            .into_iter()
            .map(|(doc, score)| SearchHit {
                reference: self.refs[doc].clone(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn entry(title: &str, contents: &str) -> IndexEntry {
        IndexEntry {
            title: title.to_string(),
            contents: contents.to_string(),
        }
    }

    fn index(entries: &[IndexEntry]) -> SearchIndex {
        SearchIndex::from_entries(entries, 10.0, 1.0)
    }

    #[test]
    fn test_single_document_match() {
        let idx = index(&[entry("Intro", "Getting started guide")]);
        let hits = idx.search("getting");
        let_assert!([hit] = hits.as_slice());
        check!(hit.reference == "Intro");
        check!(hit.score > 0.0);
    }

    #[test]
    fn test_no_match() {
        let idx = index(&[entry("Intro", "Getting started guide")]);
        check!(idx.search("zzz_missing").is_empty());
    }

    #[test]
    fn test_stop_word_only_query() {
        let idx = index(&[entry("Intro", "the guide")]);
        check!(idx.search("the").is_empty());
        check!(idx.search("   ").is_empty());
    }

    #[test]
    fn test_title_outranks_contents() {
        let idx = index(&[
            entry("Other", "routing mentioned here once"),
            entry("Routing", "intro text"),
        ]);
        let hits = idx.search("routing");
        let refs: Vec<_> = hits.iter().map(|h| h.reference.as_str()).collect();
        check!(refs == vec!["Routing", "Other"]);
        check!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_terms_are_or_combined() {
        let idx = index(&[
            entry("Alpha", "install the server"),
            entry("Beta", "configure the client"),
            entry("Gamma", "install and configure"),
        ]);
        let hits = idx.search("install configure");
        check!(hits.len() == 3);
        check!(hits[0].reference == "Gamma");
    }

    #[test]
    fn test_stemmed_query_matches_inflections() {
        let idx = index(&[entry("Deploy", "Deploying applications")]);
        check!(idx.search("deployed").len() == 1);
        check!(idx.search("applications").len() == 1);
    }

    #[test]
    fn test_prefix_wildcard() {
        let idx = index(&[entry("Config", "configuration reference"), entry("Other", "unrelated")]);
        let hits = idx.search("conf*");
        let_assert!([hit] = hits.as_slice());
        check!(hit.reference == "Config");
        check!(idx.search("*").is_empty());
    }

    #[test]
    fn test_field_scoped_term() {
        let idx = index(&[entry("Server", "client notes"), entry("Client", "server notes")]);
        let hits = idx.search("title:server");
        let_assert!([hit] = hits.as_slice());
        check!(hit.reference == "Server");

        let hits = idx.search("contents:server");
        let_assert!([hit] = hits.as_slice());
        check!(hit.reference == "Client");
    }

    #[test]
    fn test_unknown_field_prefix_is_plain_text() {
        let idx = index(&[entry("Notes", "see appendix")]);
        // "author:" is not a field, so the whole word is tokenized as text
        check!(idx.search("author:see").is_empty());
        check!(idx.search("appendix").len() == 1);
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let idx = index(&[entry("First", "shared words"), entry("Second", "shared words")]);
        let refs: Vec<_> = idx.search("shared").into_iter().map(|h| h.reference).collect();
        check!(refs == vec!["First", "Second"]);
    }

    #[test]
    fn test_duplicate_references_both_returned() {
        let idx = index(&[entry("Setup", "linux install"), entry("Setup", "windows install")]);
        let hits = idx.search("install");
        check!(hits.len() == 2);
        check!(hits.iter().all(|h| h.reference == "Setup"));
    }

    #[test]
    fn test_counts() {
        let idx = index(&[entry("Red", "red blue"), entry("Blue", "green")]);
        check!(idx.document_count() == 2);
        check!(idx.term_count() == 3);
    }
}
