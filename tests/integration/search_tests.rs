//! End-to-end search tests against mock HTTP servers

use pagesift::config::SearchConfig;
use pagesift::searcher::{search, Searcher};
use pagesift::SiteFailure;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Short timeouts so failure-path tests stay fast
fn test_config() -> SearchConfig {
    SearchConfig {
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        ..SearchConfig::default()
    }
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_matched_url_lands_in_result_set() {
    let server = MockServer::start().await;
    mount_page(&server, "/page", "<html><body>Welcome to our site</body></html>").await;

    let urls = vec![format!("{}/page", server.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert_eq!(report.matched, vec![format!("{}/page", server.uri())]);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_matching_is_case_insensitive() {
    let server = MockServer::start().await;
    mount_page(&server, "/page", "this has foo inside").await;

    let urls = vec![format!("{}/page", server.uri())];
    let report = search(&urls, "Foo", test_config()).await.expect("Search failed");

    assert_eq!(report.matched.len(), 1);
}

#[tokio::test]
async fn test_unmatched_url_leaves_no_record() {
    let server = MockServer::start().await;
    mount_page(&server, "/page", "nothing of interest here").await;

    let urls = vec![format!("{}/page", server.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert!(report.matched.is_empty());
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_schemeless_input_is_normalized_before_fetching() {
    let server = MockServer::start().await;
    mount_page(&server, "/page", "welcome aboard").await;

    // Strip the scheme from the mock server address; the normalizer must
    // supply http and the match must report the normalized form
    let schemeless = server.uri().strip_prefix("http://").unwrap().to_string();
    let urls = vec![format!("{}/page", schemeless)];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert_eq!(report.matched, vec![format!("{}/page", server.uri())]);
}

#[tokio::test]
async fn test_redirect_chain_is_followed_transitively() {
    let server = MockServer::start().await;

    // /a -> /b (rooted) -> /c (relative, no leading slash) -> body
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/b"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "c"))
        .mount(&server)
        .await;
    mount_page(&server, "/c", "welcome at the end of the chain").await;

    let urls = vec![format!("{}/a", server.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    // The originating URL is the one reported, not the redirect target
    assert_eq!(report.matched, vec![format!("{}/a", server.uri())]);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_absolute_redirect_overrides_scheme_and_host() {
    let origin = MockServer::start().await;
    let target = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/new", target.uri()).as_str()),
        )
        .mount(&origin)
        .await;
    mount_page(&target, "/new", "welcome on the other host").await;

    let urls = vec![format!("{}/moved", origin.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert_eq!(report.matched, vec![format!("{}/moved", origin.uri())]);
}

#[tokio::test]
async fn test_redirect_depth_exhaustion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let urls = vec![format!("{}/loop", server.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert!(report.matched.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].url, format!("{}/loop", server.uri()));
    assert_eq!(report.errors[0].failure, SiteFailure::RedirectLoop);
}

#[tokio::test]
async fn test_redirect_without_location_is_a_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dangling"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let urls = vec![format!("{}/dangling", server.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert_eq!(report.errors.len(), 1);
    assert!(matches!(report.errors[0].failure, SiteFailure::Fetch(_)));
}

#[tokio::test]
async fn test_http_error_status_recorded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let urls = vec![format!("{}/missing", server.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert!(report.matched.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors[0].failure,
        SiteFailure::Fetch("HTTP 404".to_string())
    );
}

#[tokio::test]
async fn test_one_failing_url_does_not_affect_the_others() {
    let server = MockServer::start().await;
    mount_page(&server, "/good", "welcome welcome").await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let urls = vec![
        format!("{}/bad", server.uri()),
        format!("{}/good", server.uri()),
    ];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert_eq!(report.matched, vec![format!("{}/good", server.uri())]);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].url, format!("{}/bad", server.uri()));
}

#[tokio::test]
async fn test_invalid_url_is_recorded_without_a_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, "/page", "welcome").await;

    let urls = vec!["http://".to_string(), format!("{}/page", server.uri())];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert_eq!(report.matched.len(), 1);
    assert_eq!(report.errors.len(), 1);
    // Normalization failures keep the raw input string
    assert_eq!(report.errors[0].url, "http://");
    assert!(matches!(report.errors[0].failure, SiteFailure::InvalidUrl(_)));
}

#[tokio::test]
async fn test_unresolvable_host_is_a_connection_failure() {
    // Reserved TLD, so both the first attempt and the www-retry fail DNS
    let urls = vec!["http://bad-host-xyz123.invalid/".to_string()];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert!(report.matched.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].url, "http://bad-host-xyz123.invalid/");
    assert!(matches!(
        report.errors[0].failure,
        SiteFailure::Connection(_)
    ));
}

#[tokio::test]
async fn test_duplicate_inputs_are_processed_independently() {
    let server = MockServer::start().await;
    mount_page(&server, "/page", "welcome twice").await;

    let url = format!("{}/page", server.uri());
    let urls = vec![url.clone(), url.clone()];
    let report = search(&urls, "welcome", test_config()).await.expect("Search failed");

    assert_eq!(report.matched, vec![url.clone(), url]);
}

#[tokio::test]
async fn test_more_urls_than_workers_all_drain() {
    let server = MockServer::start().await;
    for route in ["/p0", "/p1", "/p2", "/p3", "/p4"] {
        mount_page(&server, route, "welcome everywhere").await;
    }

    let config = SearchConfig {
        max_workers: 2,
        ..test_config()
    };
    let urls: Vec<String> = (0..5).map(|i| format!("{}/p{}", server.uri(), i)).collect();
    let report = search(&urls, "welcome", config).await.expect("Search failed");

    assert_eq!(report.matched.len(), 5);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_cancelled_run_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .expect(0)
        .mount(&server)
        .await;

    let searcher = Searcher::new(test_config());
    searcher.cancel_token().cancel();

    let urls = vec![format!("{}/page", server.uri())];
    let report = searcher.perform(&urls, "welcome").await.expect("Search failed");

    assert!(report.matched.is_empty());
    assert!(report.errors.is_empty());
    // The mock server verifies the expect(0) when it drops
}
