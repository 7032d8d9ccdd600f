//! Rust model of the search page controller.
//!
//! Runs the same phases as the browser script (build, query, render, form)
//! against an [`IndexPayload`], without a DOM.

use super::engine::{SearchHit, SearchIndex};
use super::protocol::{Location, canonical_search_url, parse_query};
use super::render::render_results;
use crate::config::ClientSettings;
use crate::payload::IndexPayload;

/// What the search page shows after loading with a given URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Text placed in the query label; `None` leaves the label untouched.
    pub query_label: Option<String>,
    /// Value pre-filled into the search input.
    pub input_value: Option<String>,
    pub hits: Vec<SearchHit>,
    /// New content of the results container.
    pub results_html: String,
}

pub struct QueryController<'a> {
    payload: &'a IndexPayload,
    settings: &'a ClientSettings,
    index: SearchIndex,
}

impl<'a> QueryController<'a> {
    /// Build phase: index the payload entries with the configured boosts.
    pub fn new(payload: &'a IndexPayload, settings: &'a ClientSettings) -> Self {
        let index = SearchIndex::from_entries(
            &payload.entries,
            settings.title_boost as f32,
            settings.contents_boost as f32,
        );
        Self {
            payload,
            settings,
            index,
        }
    }

    /// Run a query directly against the index.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.index.search(query)
    }

    /// Query and render phases for a page load with URL search component `search`.
    pub fn load(&self, search: &str) -> PageView {
        let Some(query) = parse_query(search) else {
            return PageView {
                query_label: None,
                input_value: None,
                hits: Vec::new(),
                results_html: render_results(&[], &self.payload.results, false),
            };
        };

        let hits = self.index.search(&query);
        let results_html = render_results(&hits, &self.payload.results, self.settings.escape_results);
        PageView {
            query_label: Some(query.clone()),
            input_value: Some(query),
            hits,
            results_html,
        }
    }

    /// Form phase: the URL a submission with `input` navigates to.
    pub fn submit(&self, location: &Location, input: &str) -> String {
        canonical_search_url(location, &self.settings.search_route, input)
    }
}
