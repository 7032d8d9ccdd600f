//! HTML parsing and DOM query capability.
//!
//! The extractor never talks to an HTML library directly; it receives an
//! [`HtmlDom`] implementation. [`ScraperDom`] is the production backend.

use crate::error::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Minimal DOM subset needed to pull text out of rendered pages.
pub trait HtmlDom {
    type Document;
    type Selector;
    type Element<'doc>
    where
        Self::Document: 'doc;

    /// Compile a CSS selector once so it can be reused across documents.
    fn compile(&self, selector: &str) -> Result<Self::Selector, ConfigError>;

    /// Parse an HTML string. Parsing never fails; broken markup is recovered.
    fn parse_html(&self, html: &str) -> Self::Document;

    fn query_first<'doc>(
        &self,
        document: &'doc Self::Document,
        selector: &Self::Selector,
    ) -> Option<Self::Element<'doc>>;

    fn query_all<'doc>(
        &self,
        document: &'doc Self::Document,
        selector: &Self::Selector,
    ) -> Vec<Self::Element<'doc>>;

    /// Concatenated text of all descendant text nodes.
    fn text_of(&self, element: &Self::Element<'_>) -> String;
}

/// [`HtmlDom`] backed by the `scraper` crate (html5ever + selectors).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperDom;

impl HtmlDom for ScraperDom {
    type Document = Html;
    type Selector = Selector;
    type Element<'doc> = ElementRef<'doc>;

    fn compile(&self, selector: &str) -> Result<Selector, ConfigError> {
        Selector::parse(selector).map_err(|e| ConfigError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    fn parse_html(&self, html: &str) -> Html {
        Html::parse_document(html)
    }

    fn query_first<'doc>(
        &self,
        document: &'doc Html,
        selector: &Selector,
    ) -> Option<ElementRef<'doc>> {
        document.select(selector).next()
    }

    fn query_all<'doc>(&self, document: &'doc Html, selector: &Selector) -> Vec<ElementRef<'doc>> {
        document.select(selector).collect()
    }

    fn text_of(&self, element: &ElementRef<'_>) -> String {
        element.text().collect()
    }
}
