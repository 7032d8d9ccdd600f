//! Query protocol between the browser URL and the search page.
//!
//! Reading: the query is whatever follows the last `=` in the search
//! component. Writing: every submission is sent to one canonical URL.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use url::Url;

/// Characters JavaScript's `encodeURI` escapes, besides non-ASCII.
const ENCODE_URI: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Extract the query from a URL search component such as `?query=hello`.
///
/// Everything after the last `=` is taken, so earlier parameters are ignored.
/// The value is decoded like `decodeURIComponent`: a stray `%` or malformed
/// UTF-8 anywhere makes the whole value fall back to the raw text.
/// Returns `None` for an absent or empty query.
pub fn parse_query(search: &str) -> Option<String> {
    if search.is_empty() {
        return None;
    }

    let raw = search.rsplit('=').next().unwrap_or_default();
    if raw.is_empty() {
        return None;
    }

    let decoded = if has_valid_escapes(raw) {
        percent_decode_str(raw)
            .decode_utf8()
            .map_or_else(|_| raw.to_string(), |s| s.into_owned())
    } else {
        raw.to_string()
    };
    (!decoded.is_empty()).then_some(decoded)
}

/// Every `%` is followed by two hex digits.
fn has_valid_escapes(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Percent-encode text the way JavaScript's `encodeURI` does.
pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, ENCODE_URI).to_string()
}

/// The parts of `window.location` the form handler reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme including the trailing colon, e.g. `https:`.
    pub protocol: String,
    pub hostname: String,
    /// Explicit port; `None` when the URL uses the scheme default.
    pub port: Option<u16>,
}

impl Location {
    pub fn from_url(url: &Url) -> Self {
        Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(|url| Self::from_url(&url))
    }
}

/// Canonical URL a search submission navigates to:
/// `{protocol}//{hostname}[:{port}]{route}?query={encodeURI(input)}`.
pub fn canonical_search_url(location: &Location, route: &str, input: &str) -> String {
    let port = location
        .port
        .map(|port| format!(":{}", port))
        .unwrap_or_default();
    format!(
        "{}//{}{}{}?query={}",
        location.protocol,
        location.hostname,
        port,
        route,
        encode_uri(input)
    )
}
