//! Integration tests using mock HTTP server
//!
//! Tests the full flow: starting URL → blocking HTTP fetches → Link header
//! walking → mapped items. The blocking fetcher runs on `spawn_blocking`
//! so it never lives inside the async test runtime.

use pagewalk::config::PagewalkConfig;
use pagewalk::fetch::{HttpFetcher, HttpFetcherConfig};
use pagewalk::link::LinkPolicy;
use pagewalk::pagination::{IterState, Pagination};
use pagewalk::{Cursor, ErrorKind, JsonObject, Result};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Org {
    login: String,
    id: u64,
}

fn next_link(uri: &str) -> String {
    format!("<{uri}>; rel=\"next\"")
}

async fn mount_page(server: &MockServer, page: &str, body: serde_json::Value, next: Option<String>) {
    let mut response = ResponseTemplate::new(200).set_body_json(body);
    if let Some(next) = next {
        response = response.insert_header("link", next.as_str());
    }
    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .and(query_param("page", page))
        .respond_with(response)
        .mount(server)
        .await;
}

fn fetcher() -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new().unwrap())
}

// ============================================================================
// Full traversal
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_walks_all_pages_in_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "1",
        json!([{"login": "jcabi", "id": 1}, {"login": "rexsl", "id": 2}]),
        Some(next_link(&format!("{base}/user/orgs?page=2"))),
    )
    .await;
    mount_page(
        &server,
        "2",
        json!([{"login": "yegor256", "id": 3}]),
        None,
    )
    .await;

    let start = format!("{base}/user/orgs?page=1");
    let orgs = tokio::task::spawn_blocking(move || {
        Pagination::<Org>::deserialize(fetcher(), Cursor::parse(&start).unwrap()).collect_all()
    })
    .await
    .unwrap()
    .unwrap();

    let logins: Vec<&str> = orgs.iter().map(|o| o.login.as_str()).collect();
    assert_eq!(logins, vec!["jcabi", "rexsl", "yegor256"]);
    assert_eq!(orgs[2].id, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_relative_links_and_empty_middle_page() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "1",
        json!([{"id": 1}]),
        Some(next_link("/user/orgs?page=2")),
    )
    .await;
    mount_page(&server, "2", json!([]), Some(next_link("?page=3"))).await;
    mount_page(&server, "3", json!([{"id": 2}]), None).await;

    let start = format!("{}/user/orgs?page=1", server.uri());
    let (ids, pages) = tokio::task::spawn_blocking(move || {
        let id = |o: &JsonObject| -> Result<u64> { Ok(o["id"].as_u64().unwrap_or_default()) };
        let source = Pagination::new(fetcher(), Cursor::parse(&start).unwrap(), id);
        let mut items = source.iter();
        let mut ids = Vec::new();
        while items.has_next().unwrap() {
            ids.push(items.next_item().unwrap());
        }
        (ids, items.stats().pages_fetched)
    })
    .await
    .unwrap();

    assert_eq!(ids, vec![1, 2]);
    assert_eq!(pages, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_restart_fetches_again_from_first_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next_link(&format!("{base}/user/orgs?page=2")).as_str())
                .set_body_json(json!([{"id": 1}])),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .expect(2)
        .mount(&server)
        .await;

    let start = format!("{base}/user/orgs?page=1");
    let (first, second) = tokio::task::spawn_blocking(move || {
        let source = Pagination::raw(fetcher(), Cursor::parse(&start).unwrap());
        (source.collect_all().unwrap(), source.collect_all().unwrap())
    })
    .await
    .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_stops_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let start = format!("{}/user/orgs", server.uri());
    let (kind, state) = tokio::task::spawn_blocking(move || {
        let source = Pagination::raw(fetcher(), Cursor::parse(&start).unwrap());
        let mut items = source.iter();
        let kind = items.has_next().unwrap_err().kind();
        // No second request: the traversal is parked on the same kind
        assert_eq!(items.has_next().unwrap_err().kind(), kind);
        (kind, items.state())
    })
    .await
    .unwrap();

    assert_eq!(kind, ErrorKind::Protocol);
    assert_eq!(state, IterState::Failed);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_link_follows_policy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", "page=2; rel=next")
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&server)
        .await;

    let start = format!("{}/user/orgs", server.uri());
    let (lenient, strict) = tokio::task::spawn_blocking(move || {
        let source = Pagination::raw(fetcher(), Cursor::parse(&start).unwrap());
        let lenient = source.collect_all().map(|items| items.len());
        let strict = source
            .clone()
            .with_link_policy(LinkPolicy::Strict)
            .collect_all()
            .map(|items| items.len());
        (lenient, strict)
    })
    .await
    .unwrap();

    assert_eq!(lenient.unwrap(), 1);
    assert_eq!(strict.unwrap_err().kind(), ErrorKind::Parse);
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_config_headers_reach_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .and(header("Authorization", "Bearer ghp_token"))
        .and(header("Accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = r#"
http:
  timeout_seconds: 10
  headers:
    Accept: "application/vnd.github+json"
  token: "ghp_token"
"#;
    let start = format!("{}/user/orgs", server.uri());
    let count = tokio::task::spawn_blocking(move || {
        let config = PagewalkConfig::from_yaml_str(yaml).unwrap();
        let source = Pagination::raw(
            Arc::new(config.fetcher().unwrap()),
            Cursor::parse(&start).unwrap(),
        )
        .with_link_policy(config.links.policy);
        source.collect_all().unwrap().len()
    })
    .await
    .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_custom_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .and(header("User-Agent", "octo-walker/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let start = format!("{}/user/orgs", server.uri());
    let empty = tokio::task::spawn_blocking(move || {
        let config = HttpFetcherConfig::builder()
            .user_agent("octo-walker/1.0")
            .build();
        let fetcher = Arc::new(HttpFetcher::with_config(config).unwrap());
        let mut items = Pagination::raw(fetcher, Cursor::parse(&start).unwrap()).iter();
        !items.has_next().unwrap()
    })
    .await
    .unwrap();

    assert!(empty);
}
