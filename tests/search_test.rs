mod common;

use assert2::{check, let_assert};
use common::{docs_site, plugin};
use moonsearch::client::{Location, NO_RESULTS_HTML, QueryController, parse_query};
use moonsearch::{ClientSettings, DocsSearch, IndexEntry, IndexPayload, SiteFiles};
use rstest::rstest;

fn intro_payload() -> IndexPayload {
    IndexPayload {
        entries: vec![IndexEntry {
            title: "Intro".to_string(),
            contents: "Getting started guide".to_string(),
        }],
        ..IndexPayload::default()
    }
}

// --- Query parsing ---

#[rstest]
#[case("?query=hello", "hello")]
#[case("?a=1&query=hello%20world", "hello world")]
#[case("?query=foo%20bar", "foo bar")]
fn query_is_value_after_last_equals(#[case] search: &str, #[case] expected: &str) {
    check!(parse_query(search).as_deref() == Some(expected));
}

#[rstest]
#[case("")]
#[case("?query=")]
fn missing_query_is_none(#[case] search: &str) {
    check!(parse_query(search) == None);
}

// --- Search scenarios ---

#[test]
fn single_entry_is_found() {
    let payload = intro_payload();
    let settings = ClientSettings::default();
    let controller = QueryController::new(&payload, &settings);

    let hits = controller.search("getting");
    let_assert!([hit] = hits.as_slice());
    check!(hit.reference == "Intro");
}

#[test]
fn unmatched_query_renders_placeholder() {
    let payload = intro_payload();
    let settings = ClientSettings::default();
    let controller = QueryController::new(&payload, &settings);

    let view = controller.load("?query=zzz_missing");
    check!(view.hits.is_empty());
    check!(view.results_html == NO_RESULTS_HTML);
    check!(view.results_html.contains("No results found!"));
}

#[rstest]
fn built_site_ranks_title_match_first(plugin: DocsSearch, docs_site: SiteFiles) {
    let build = plugin.build(&docs_site).unwrap();
    let controller = QueryController::new(&build.payload, &plugin.config().client);

    let view = controller.load("?query=routing");
    let refs: Vec<_> = view.hits.iter().map(|h| h.reference.as_str()).collect();
    // The blog post mentions routing but is not documentation
    check!(refs == vec!["Routing"]);
    check!(view.results_html.contains("<a href=\"/docs/routing.html\"><h3>Routing</h3>"));
    check!(view.results_html.contains("<p>How requests reach handlers...</p>"));
}

#[rstest]
fn results_render_in_ranked_order(plugin: DocsSearch, docs_site: SiteFiles) {
    let build = plugin.build(&docs_site).unwrap();
    let controller = QueryController::new(&build.payload, &plugin.config().client);

    // Routing mentions handlers, the untitled index page mentions guides
    let view = controller.load("?query=handlers%20guides");
    check!(view.hits.len() == 2);

    let positions: Vec<_> = view
        .hits
        .iter()
        .map(|hit| {
            let needle = format!("<h3>{}</h3>", hit.reference);
            view.results_html.find(&needle).unwrap()
        })
        .collect();
    check!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[rstest]
fn decoded_query_is_searched(plugin: DocsSearch, docs_site: SiteFiles) {
    let build = plugin.build(&docs_site).unwrap();
    let controller = QueryController::new(&build.payload, &plugin.config().client);

    let view = controller.load("?ref=nav&query=nested%20middleware");
    check!(view.query_label.as_deref() == Some("nested middleware"));
    check!(view.input_value.as_deref() == Some("nested middleware"));
    check!(view.hits.first().map(|h| h.reference.as_str()) == Some("Routing"));
}

// --- Form submission ---

#[test]
fn form_submit_builds_canonical_url() {
    let payload = intro_payload();
    let settings = ClientSettings::default();
    let controller = QueryController::new(&payload, &settings);

    let location = Location {
        protocol: "https:".to_string(),
        hostname: "example.com".to_string(),
        port: None,
    };
    check!(
        controller.submit(&location, "foo bar") == "https://example.com/docs/search?query=foo%20bar"
    );
}

#[test]
fn submitted_url_round_trips_through_load() {
    let payload = intro_payload();
    let settings = ClientSettings::default();
    let controller = QueryController::new(&payload, &settings);

    let_assert!(Ok(location) = Location::parse("http://localhost:3000/docs/"));
    let url = controller.submit(&location, "getting started");
    check!(url == "http://localhost:3000/docs/search?query=getting%20started");

    let search = &url[url.find('?').unwrap()..];
    let view = controller.load(search);
    check!(view.query_label.as_deref() == Some("getting started"));
    check!(view.hits.len() == 1);
}
