//! Search page client: the embedded browser script and its Rust model.
//!
//! The browser runs `assets/docs-search.js`. The modules here implement the
//! same contract so builds can preview queries and the behavior can be tested
//! without a browser.
//!
//! The two sides must stay in step:
//!
//! | Browser (`docs-search.js`) | Rust |
//! |---|---|
//! | `lunr(...)` with `ref('title')` and boosted fields | [`SearchIndex::from_entries`] |
//! | `parseQuery` | [`parse_query`] |
//! | `renderResults`, `noResultsHtml`, `escapeHtml` | [`render_results`], [`NO_RESULTS_HTML`], [`escape_html`] |
//! | form `submit` handler | [`canonical_search_url`] |

pub(crate) mod controller;
pub(crate) mod engine;
pub(crate) mod protocol;
pub(crate) mod render;
pub(crate) mod tokenize;

/// Source of the browser controller, embedded verbatim into the generated script.
pub const CONTROLLER_SOURCE: &str = include_str!("../../assets/docs-search.js");

pub use controller::{PageView, QueryController};
pub use engine::{Field, IndexBuilder, SearchHit, SearchIndex};
pub use protocol::{Location, canonical_search_url, encode_uri, parse_query};
pub use render::{NO_RESULTS_HTML, escape_html, render_results};
