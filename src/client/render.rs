//! Result markup shared by the browser script and its Rust model.

use super::engine::SearchHit;
use crate::payload::ResultMap;

/// Placeholder shown for an empty query or an empty result set.
pub const NO_RESULTS_HTML: &str = "<div class=\"row result-row\"><div class=\"col\"><h3><i class=\"fas fa-ban\"></i>&nbsp;&nbsp;<strong>No results found!</strong> Please try another search.</h3></div></div>";

/// Escape text for insertion into HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render ranked hits into the results container markup.
///
/// Titles and excerpts are inserted as-is unless `escape` is set.
pub fn render_results(hits: &[SearchHit], results: &ResultMap, escape: bool) -> String {
    if hits.is_empty() {
        return NO_RESULTS_HTML.to_string();
    }

    let present = |text: &str| {
        if escape {
            escape_html(text)
        } else {
            text.to_string()
        }
    };

    let mut html = String::new();
    for hit in hits {
        let record = results.get(&hit.reference);
        let href = record.map(|r| r.href()).unwrap_or_default();
        let excerpt = record.map(|r| r.excerpt.as_str()).unwrap_or_default();
        html.push_str(&format!(
            "<div class=\"row\"><div class=\"col\"><a href=\"{}\"><h3>{}</h3><p>{}</p></a></div></div>",
            href,
            present(&hit.reference),
            present(excerpt)
        ));
    }
    html
}
