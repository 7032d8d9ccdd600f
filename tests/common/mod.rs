//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `docs_site`: a small site with three documentation pages, a blog post,
//!   a stylesheet and a home page, in a fixed order
//! - `plugin`: the docs search plugin with default configuration
//!
//! Pages are built with [`doc_page`], which wraps a lead paragraph and body
//! text in the markup the documentation layout renders.

use moonsearch::{DocsSearch, SearchConfig, SiteFile, SiteFiles};
use rstest::fixture;

/// Render a documentation page the way the layout does: site chrome around a
/// `.docs-content` region whose first paragraph is the lead.
pub fn doc_page(lead: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Docs</title></head>\n<body>\n\
         <nav class=\"navbar\"><a href=\"/\">Home</a></nav>\n\
         <div class=\"docs-content\">\n<p>{}</p>\n<p>{}</p>\n</div>\n\
         <footer>Footer text</footer>\n</body>\n</html>\n",
        lead, body
    )
}

/// A documentation site file with a resolved link path.
#[allow(dead_code)] // Used in build_test.rs
pub fn doc_file(title: Option<&str>, name: &str, lead: &str, body: &str) -> SiteFile {
    let file = SiteFile::from_contents(doc_page(lead, body))
        .with_layout("docs.hbs")
        .with_path("/docs/", name);
    match title {
        Some(title) => file.with_title(title),
        None => file,
    }
}

#[fixture]
pub fn docs_site() -> SiteFiles {
    [
        (
            "index.html",
            SiteFile::from_contents("<p>Welcome home</p>").with_layout("home.hbs"),
        ),
        (
            "docs/intro.html",
            doc_file(
                Some("Intro"),
                "intro.html",
                "Getting started guide.",
                "Install the toolchain and run your first build.",
            ),
        ),
        (
            "docs/routing.html",
            doc_file(
                Some("Routing"),
                "routing.html",
                "How requests reach handlers.",
                "Routes map paths to handlers; nested routes inherit middleware.",
            ),
        ),
        ("css/site.css", SiteFile::from_contents("body { margin: 0 }")),
        (
            "docs/index.html",
            doc_file(
                None,
                "index.html",
                "Everything about the framework.",
                "Browse the guides on the left.",
            ),
        ),
        (
            "blog/launch.html",
            SiteFile::from_contents("<p>We launched a routing framework</p>")
                .with_layout("post.hbs")
                .with_title("Launch"),
        ),
    ]
    .into_iter()
    .collect()
}

#[fixture]
pub fn plugin() -> DocsSearch {
    DocsSearch::new(SearchConfig::default()).expect("default config is valid")
}
