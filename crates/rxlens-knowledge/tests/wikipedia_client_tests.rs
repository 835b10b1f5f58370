//! WikipediaClient against a local stand-in for the MediaWiki Action API.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use rxlens_common::SandboxClient;
use rxlens_knowledge::{KnowledgeSource, LookupError, WikipediaClient};

async fn fake_api(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("list").map(String::as_str) == Some("search") {
        let hits = match params.get("srsearch").map(String::as_str) {
            Some("Flu" | "Cold|Flu" | "Flu#Symptoms") => json!([{"ns": 0, "title": "Influenza"}]),
            Some("Fever") => json!([{"ns": 0, "title": "Fever|Chills"}]),
            _ => json!([]),
        };
        return Json(json!({"query": {"searchinfo": {"totalhits": 0}, "search": hits}})).into_response();
    }

    // The real API splits on '|' and drops anything after '#'
    if let Some(titles) = params.get("titles").filter(|t| t.contains(['|', '#'])) {
        let pages: Vec<_> = titles
            .split('|')
            .map(|t| json!({"title": t.split('#').next().unwrap_or(t), "extract": "Wrong page."}))
            .collect();
        return Json(json!({"query": {"pages": pages}})).into_response();
    }

    match params.get("titles").map(String::as_str) {
        Some("Influenza") => Json(json!({"query": {"pages": [{
            "title": "Influenza",
            "extract": "Influenza is an infectious disease caused by influenza viruses.",
            "fullurl": "https://en.wikipedia.org/wiki/Influenza"
        }]}}))
        .into_response(),
        Some("Depression") => Json(json!({"query": {"pages": [{
            "title": "Depression",
            "pageprops": {"disambiguation": ""},
            "links": [{"ns": 0, "title": "Depression (mood)"}, {"ns": 0, "title": "Depression (economics)"}]
        }]}}))
        .into_response(),
        Some("Boom") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("Sleepy") => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({})).into_response()
        }
        Some(other) => Json(json!({"query": {"pages": [{"title": other, "missing": true}]}})).into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn spawn_fake_wikipedia() -> String {
    let app = Router::new().route("/w/api.php", get(fake_api));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/w/api.php", addr)
}

async fn client() -> WikipediaClient {
    let base_url = spawn_fake_wikipedia().await;
    let sandbox = SandboxClient::new(Duration::from_millis(500), "rxlens-test").unwrap();
    WikipediaClient::new(sandbox, base_url, 5).unwrap()
}

#[tokio::test]
async fn test_exact_title_resolves() {
    let client = client().await;
    let summary = client.summarize("Influenza").await.unwrap();
    assert_eq!(summary.title, "Influenza");
    assert!(summary.summary.starts_with("Influenza is an infectious disease"));
    assert_eq!(summary.url, "https://en.wikipedia.org/wiki/Influenza");
}

#[tokio::test]
async fn test_missing_title_falls_back_to_search() {
    let client = client().await;
    let summary = client.summarize("Flu").await.unwrap();
    assert_eq!(summary.title, "Influenza");
}

#[tokio::test]
async fn test_terms_with_title_separators_go_to_search() {
    let client = client().await;
    for term in ["Cold|Flu", "Flu#Symptoms"] {
        let summary = client.summarize(term).await.unwrap();
        assert_eq!(summary.title, "Influenza", "term {term}");
    }
}

#[tokio::test]
async fn test_unsafe_search_title_is_not_refetched() {
    let client = client().await;
    let err = client.summarize("Fever").await.unwrap_err();
    assert_eq!(err, LookupError::NotFound { term: "Fever".into() });
}

#[tokio::test]
async fn test_disambiguation_is_ambiguous() {
    let client = client().await;
    let err = client.summarize("Depression").await.unwrap_err();
    assert_eq!(
        err,
        LookupError::Ambiguous {
            term: "Depression".into(),
            candidates: vec!["Depression (mood)".into(), "Depression (economics)".into()],
        }
    );
}

#[tokio::test]
async fn test_no_page_and_no_search_hit_is_not_found() {
    let client = client().await;
    let err = client.summarize("Xyzzyquil").await.unwrap_err();
    assert_eq!(err, LookupError::NotFound { term: "Xyzzyquil".into() });
}

#[tokio::test]
async fn test_blank_term_is_not_found_without_a_request() {
    let client = client().await;
    assert!(matches!(client.summarize("   ").await, Err(LookupError::NotFound { .. })));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let client = client().await;
    let err = client.summarize("Boom").await.unwrap_err();
    assert!(matches!(err, LookupError::Unavailable { ref reason, .. } if reason.contains("500")));
}

#[tokio::test]
async fn test_slow_server_is_unavailable() {
    let client = client().await;
    let err = client.summarize("Sleepy").await.unwrap_err();
    assert!(matches!(err, LookupError::Unavailable { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_host_is_unavailable() {
    // Bind then drop to get a local port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sandbox = SandboxClient::new(Duration::from_millis(500), "rxlens-test").unwrap();
    let client = WikipediaClient::new(sandbox, format!("http://{}/w/api.php", addr), 5).unwrap();
    assert!(matches!(client.summarize("Influenza").await, Err(LookupError::Unavailable { .. })));
}

/// Run with: cargo test --package rxlens-knowledge --test wikipedia_client_tests -- --ignored --nocapture
#[tokio::test]
#[ignore] // Requires network access
async fn test_live_wikipedia_lookup() {
    let client = WikipediaClient::from_config(&rxlens_common::KnowledgeConfig::default()).unwrap();
    let summary = client.summarize("Ibuprofen").await.expect("live lookup failed");
    println!("{}: {}", summary.title, summary.url);
    assert!(!summary.summary.is_empty());
}
