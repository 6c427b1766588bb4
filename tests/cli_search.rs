//! The search step of the CLI: empty results and failures

mod common;

use atlas::cli::search_and_browse;
use atlas::config::Config;
use atlas::opener::LinkOpener;
use atlas::search::providers::HackerNewsProvider;
use atlas::search::{SearchError, SearchOptions};
use common::test_http_config;
use mockito::{Matcher, Mock, Server};
use std::process::ExitCode;

/// Fails the test if the browser ever tries to open a link
struct NoOpener;

impl LinkOpener for NoOpener {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        panic!("browser should not have been started, tried to open {url}");
    }
}

/// A Hacker News provider whose endpoint answers with `status` and `body`
async fn hackernews_returning(server: &mut Server, status: usize, body: &str) -> (HackerNewsProvider, Mock) {
    let mock = server
        .mock("GET", "/api/v1/search")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;

    let provider = HackerNewsProvider::new(&test_http_config())
        .unwrap()
        .with_base_url(format!("{}/api/v1/search", server.url()));
    (provider, mock)
}

#[tokio::test]
async fn test_no_results_exits_successfully_without_browser() {
    let mut server = Server::new_async().await;
    let (provider, _mock) = hackernews_returning(&mut server, 200, r#"{"hits": []}"#).await;

    let code = search_and_browse(
        &provider,
        &SearchOptions::new("nothing matches", 10),
        &Config::default(),
        Box::new(NoOpener),
    )
    .await
    .unwrap();

    assert_eq!(code, ExitCode::SUCCESS);
}

#[tokio::test]
async fn test_failed_search_is_reported_as_search_failed() {
    let mut server = Server::new_async().await;
    let (provider, _mock) = hackernews_returning(&mut server, 500, "upstream exploded").await;

    let err = search_and_browse(
        &provider,
        &SearchOptions::new("rust", 10),
        &Config::default(),
        Box::new(NoOpener),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "search failed");
    match err.root_cause().downcast_ref::<SearchError>() {
        Some(SearchError::Provider { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected provider error underneath, got {other:?}"),
    }
}

#[tokio::test]
async fn test_blank_query_is_reported_as_search_failed() {
    let mut server = Server::new_async().await;
    let (provider, _mock) = hackernews_returning(&mut server, 200, r#"{"hits": []}"#).await;

    let err = search_and_browse(
        &provider,
        &SearchOptions::new("  ", 10),
        &Config::default(),
        Box::new(NoOpener),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "search failed");
    assert!(format!("{err:#}").contains("query must not be empty"));
}
