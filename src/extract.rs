//! Documentation page classification and text extraction.

use crate::config::SearchConfig;
use crate::error::ConfigError;
use crate::html::HtmlDom;
use crate::site::{SiteFile, SiteFiles};
use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("line break pattern is valid"));

/// A documentation page reduced to what the index needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    /// Output-relative path of the page in the site file set.
    pub source: String,
    pub title: String,
    pub excerpt: String,
    /// Text of every content region, joined, with line breaks removed.
    pub body: String,
    /// The page's own record, carried into the result map.
    pub file: SiteFile,
}

/// Builds an excerpt from first-paragraph text.
///
/// The last character is replaced by `...`; empty text stays empty.
pub fn make_excerpt(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next_back() {
        Some(_) => format!("{}...", chars.as_str()),
        None => String::new(),
    }
}

/// Remove every carriage return and line feed.
pub fn strip_line_breaks(text: &str) -> String {
    LINE_BREAKS.replace_all(text, "").into_owned()
}

/// Selects documentation pages and derives title, excerpt and body text.
pub struct Extractor<'a, D: HtmlDom> {
    dom: &'a D,
    layout: &'a str,
    default_title: &'a str,
    excerpt: D::Selector,
    content: D::Selector,
}

impl<'a, D: HtmlDom> Extractor<'a, D> {
    /// Compile the configured selectors against `dom`.
    pub fn new(dom: &'a D, config: &'a SearchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            dom,
            layout: &config.layout,
            default_title: &config.default_title,
            excerpt: dom.compile(&config.excerpt_selector)?,
            content: dom.compile(&config.content_selector)?,
        })
    }

    pub fn is_documentation(&self, file: &SiteFile) -> bool {
        file.layout.as_deref() == Some(self.layout)
    }

    /// Extract one page, or `None` when it is not documentation.
    pub fn extract(&self, source: &str, file: &SiteFile) -> Option<ExtractedDocument> {
        if !self.is_documentation(file) {
            return None;
        }

        let title = file
            .title
            .clone()
            .unwrap_or_else(|| self.default_title.to_string());

        let document = self.dom.parse_html(&file.contents);

        let excerpt = match self.dom.query_first(&document, &self.excerpt) {
            Some(paragraph) => make_excerpt(&self.dom.text_of(&paragraph)),
            None => {
                tracing::debug!("No excerpt paragraph in '{}'", source);
                String::new()
            }
        };

        let regions = self.dom.query_all(&document, &self.content);
        if regions.is_empty() {
            tracing::debug!("No content region in '{}'", source);
        }
        let text: String = regions
            .iter()
            .map(|region| self.dom.text_of(region))
            .collect();
        let body = strip_line_breaks(&text);

        Some(ExtractedDocument {
            source: source.to_string(),
            title,
            excerpt,
            body,
            file: file.clone(),
        })
    }

    /// Extract every documentation page in file-set order.
    pub fn extract_all(&self, files: &SiteFiles) -> Vec<ExtractedDocument> {
        files
            .iter()
            .filter_map(|(source, file)| self.extract(source, file))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::ScraperDom;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("Getting started.", "Getting started...")]
    #[case("x", "...")]
    #[case("", "")]
    #[case("Grüße", "Grüß...")]
    #[case("日本語", "日本...")]
    fn test_make_excerpt(#[case] text: &str, #[case] expected: &str) {
        check!(make_excerpt(text) == expected);
    }

    #[rstest]
    #[case("a\nb", "ab")]
    #[case("a\r\n\r\nb", "ab")]
    #[case("line\r", "line")]
    #[case("  keep spaces  ", "  keep spaces  ")]
    fn test_strip_line_breaks(#[case] text: &str, #[case] expected: &str) {
        check!(strip_line_breaks(text) == expected);
    }

    fn page(contents: &str) -> SiteFile {
        SiteFile::from_contents(contents)
            .with_layout("docs.hbs")
            .with_path("/docs/", "page.html")
    }

    #[test]
    fn test_extract_doc_page() {
        let config = SearchConfig::default();
        let dom = ScraperDom;
        let extractor = Extractor::new(&dom, &config).unwrap();

        let html = "<html><body><nav><a href=\"/\">Home</a></nav>\
            <div class=\"docs-content\">\n<h1>Install</h1>\n<p>Run the installer.</p>\r\n<p>Then restart.</p>\n</div>\
            </body></html>";
        let file = page(html).with_title("Install");

        let_assert!(Some(doc) = extractor.extract("docs/install.html", &file));
        check!(doc.title == "Install");
        check!(doc.source == "docs/install.html");
        check!(doc.excerpt == "Run the installer...");
        check!(doc.body == "InstallRun the installer.Then restart.");
        check!(!doc.body.contains(['\r', '\n']));
        check!(doc.file == file);
    }

    #[test]
    fn test_body_joins_every_content_region() {
        let config = SearchConfig::default();
        let dom = ScraperDom;
        let extractor = Extractor::new(&dom, &config).unwrap();

        let html = "<div class=\"docs-content\"><p>First part</p></div>\n\
            <aside>Sidebar</aside>\n\
            <div class=\"docs-content\"><p>Second\npart</p></div>";
        let_assert!(Some(doc) = extractor.extract("docs/split.html", &page(html)));
        check!(doc.body == "First partSecondpart");
        check!(doc.excerpt == "First par...");
    }

    #[test]
    fn test_default_title() {
        let config = SearchConfig::default();
        let dom = ScraperDom;
        let extractor = Extractor::new(&dom, &config).unwrap();

        let_assert!(Some(doc) = extractor.extract("docs/index.html", &page("<p>Hello</p>")));
        check!(doc.title == "Documentation");
    }

    #[test]
    fn test_missing_structure_degrades_to_empty() {
        let config = SearchConfig::default();
        let dom = ScraperDom;
        let extractor = Extractor::new(&dom, &config).unwrap();

        let_assert!(Some(doc) = extractor.extract("docs/empty.html", &page("<<<not html")));
        check!(doc.excerpt.is_empty());
        check!(doc.body.is_empty());
    }

    #[test]
    fn test_non_documentation_skipped() {
        let config = SearchConfig::default();
        let dom = ScraperDom;
        let extractor = Extractor::new(&dom, &config).unwrap();

        let blog = SiteFile::from_contents("<p>post</p>").with_layout("post.hbs");
        let asset = SiteFile::from_contents("body {}");
        check!(extractor.extract("blog/post.html", &blog).is_none());
        check!(extractor.extract("css/site.css", &asset).is_none());
    }

    #[test]
    fn test_extract_all_in_order() {
        let config = SearchConfig::default();
        let dom = ScraperDom;
        let extractor = Extractor::new(&dom, &config).unwrap();

        let files: SiteFiles = [
            ("docs/b.html", page("<p>B</p>").with_title("B")),
            ("index.html", SiteFile::from_contents("<p>home</p>").with_layout("home.hbs")),
            ("docs/a.html", page("<p>A</p>").with_title("A")),
        ]
        .into_iter()
        .collect();

        let titles: Vec<_> = extractor
            .extract_all(&files)
            .into_iter()
            .map(|d| d.title)
            .collect();
        check!(titles == vec!["B", "A"]);
    }

    #[test]
    fn test_custom_selectors() {
        let config = SearchConfig {
            layout: "guide.hbs".into(),
            content_selector: "main".into(),
            excerpt_selector: "p.lead".into(),
            ..SearchConfig::default()
        };
        let dom = ScraperDom;
        let extractor = Extractor::new(&dom, &config).unwrap();

        let file = SiteFile::from_contents("<p>skip</p><main><p class=\"lead\">Lead text</p></main>")
            .with_layout("guide.hbs");
        let_assert!(Some(doc) = extractor.extract("guide.html", &file));
        check!(doc.excerpt == "Lead tex...");
        check!(doc.body == "Lead text");
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let config = SearchConfig {
            content_selector: "div[".into(),
            ..SearchConfig::default()
        };
        let dom = ScraperDom;
        let_assert!(Some(ConfigError::Selector { .. }) = Extractor::new(&dom, &config).err());
    }
}
