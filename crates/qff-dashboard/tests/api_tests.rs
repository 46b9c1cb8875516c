//! Integration tests for the dashboard API.

use std::sync::Arc;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};

use qff_adapter_sim::SimulatorBackend;
use qff_dashboard::{AppState, create_router};
use qff_finder::FinderConfig;

// ============================================================================
// Test helpers
// ============================================================================

fn seeded_config(seed: u64) -> FinderConfig {
    let mut config = FinderConfig::default();
    config.search.seed = Some(seed);
    config
}

fn test_server(state: Arc<AppState>) -> TestServer {
    let router = create_router(state);
    TestServer::new(router).expect("test server")
}

fn seeded_server() -> TestServer {
    test_server(Arc::new(AppState::new(seeded_config(42))))
}

async fn run_search(server: &TestServer, name: &str) -> Value {
    let response = server.post("/api/search").json(&json!({ "name": name })).await;
    response.assert_status_ok();
    response.json()
}

// ============================================================================
// Health and static content
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let server = seeded_server();
    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_index_page() {
    let server = seeded_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<title>Grover's Search Demo</title>"));
    assert!(html.contains("Quantum Friend Finder with Grover's Algorithm"));
    assert!(html.contains("Run Grover's Algorithm"));
}

// ============================================================================
// Friends
// ============================================================================

#[tokio::test]
async fn test_friends_in_index_order() {
    let server = seeded_server();
    let response = server.get("/api/friends").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let friends = body["friends"].as_array().unwrap();
    assert_eq!(body["count"], 1024);
    assert_eq!(friends.len(), 1024);
    assert_eq!(friends[0], "Friend_0");
    assert_eq!(friends[1023], "Friend_1023");
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_finds_friend() {
    let server = seeded_server();
    let body = run_search(&server, "Friend_5").await;

    assert_eq!(body["friend"], "Friend_5");
    assert_eq!(body["target_bin"], "0000000101");
    assert_eq!(body["found"], true);
    assert_eq!(body["total_shots"], 1024);
    assert_eq!(body["iterations"], 6);
    assert_eq!(body["backend"], "simulator");

    let phone = body["phone"].as_str().unwrap();
    assert_eq!(phone.len(), 10);
    assert!(phone.bytes().all(|b| b.is_ascii_digit()));

    let top = body["top"].as_array().unwrap();
    assert!(!top.is_empty() && top.len() <= 10);
    assert_eq!(top[0]["state"], "0000000101");

    let lines = body["probability_lines"].as_array().unwrap();
    assert_eq!(lines.len(), top.len());
    assert!(lines[0].as_str().unwrap().starts_with("State `0000000101` → 0."));

    assert!(body["circuit_diagram"].as_str().unwrap().contains("q_9"));
    assert!(body["stats"]["ops_after"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_search_unknown_friend_returns_404() {
    let server = seeded_server();
    let response = server
        .post("/api/search")
        .json(&json!({ "name": "Friend_4096" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("Friend_4096"));
}

#[tokio::test]
async fn test_search_empty_name_returns_400() {
    let server = seeded_server();
    let response = server.post("/api/search").json(&json!({ "name": "  " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_backend_failure_returns_502() {
    let backend = Arc::new(SimulatorBackend::with_max_qubits(5));
    let state = Arc::new(AppState::with_backend(seeded_config(1), backend));
    let server = test_server(state);

    let response = server
        .post("/api/search")
        .json(&json!({ "name": "Friend_1" }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let body: Value = response.json();
    assert_eq!(body["error"], "backend_error");
}

// ============================================================================
// Stored runs and downloads
// ============================================================================

#[tokio::test]
async fn test_histogram_download() {
    let server = seeded_server();
    let body = run_search(&server, "Friend_300").await;
    let url = body["histogram_url"].as_str().unwrap();

    let response = server.get(url).await;
    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "image/png");
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"top10_histogram.png\""
    );

    let bytes = response.as_bytes();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_circuit_download() {
    let server = seeded_server();
    let body = run_search(&server, "Friend_7").await;
    let url = body["diagram_url"].as_str().unwrap();

    let response = server.get(url).await;
    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"circuit_diagram.txt\""
    );
    assert_eq!(response.text(), body["circuit_diagram"].as_str().unwrap());
}

#[tokio::test]
async fn test_runs_listing_and_lookup() {
    let server = seeded_server();
    let first = run_search(&server, "Friend_1").await;
    let second = run_search(&server, "Friend_2").await;

    let listing: Value = server.get("/api/runs").await.json();
    let runs = listing.as_array().unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0]["run_id"], second["run_id"]);
    assert_eq!(runs[1]["friend"], "Friend_1");

    let id = first["run_id"].as_str().unwrap();
    let response = server.get(&format!("/api/runs/{id}")).await;
    response.assert_status_ok();
    let run: Value = response.json();
    assert_eq!(run["target_bin"], "0000000001");
}

#[tokio::test]
async fn test_unknown_run_returns_404() {
    let server = seeded_server();
    let id = "00000000-0000-4000-8000-000000000000";
    let response = server.get(&format!("/api/runs/{id}/histogram.png")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_run_id_returns_400() {
    let server = seeded_server();
    let response = server.get("/api/runs/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
