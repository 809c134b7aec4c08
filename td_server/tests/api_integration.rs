//! HTTP integration tests for the directory API.
//!
//! Drives the router in-process; no socket is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode, header::HeaderMap};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use td_server::api::{AppState, create_router};
use tournament_directory::{DirectoryManager, NoLatency};
use tower::ServiceExt;

/// Helper to create a test server, optionally seeded with the demo data
fn create_test_server(seeded: bool) -> axum::Router {
    let directory = if seeded {
        DirectoryManager::with_demo_data(Arc::new(NoLatency))
    } else {
        DirectoryManager::default()
    };
    let state = AppState {
        directory: Arc::new(directory),
    };
    create_router(state, None)
}

/// Send one request and decode the JSON response
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

async fn create_tournament(app: &axum::Router, max_players: u32) -> i64 {
    let (status, _, body) = send(
        app,
        "POST",
        "/api/v1/tournaments",
        Some(json!({
            "name": "Spring Open",
            "site": { "id": 1 },
            "startingChips": 5000,
            "totalRounds": 10,
            "maxPlayers": max_players,
            "tournamentType": "PVD",
            "startTime": "2025-01-10T18:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn register(app: &axum::Router, tournament_id: i64, username: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        "POST",
        &format!("/api/v1/tournaments/{tournament_id}/registrations"),
        Some(json!({ "username": username, "email": format!("{username}@example.com") })),
    )
    .await;
    (status, body)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_collection_sizes() {
    let app = create_test_server(true);

    let (status, _, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sites"], 2);
    assert_eq!(body["tournaments"], 2);
    assert_eq!(body["registrations"], 0);
}

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let app = create_test_server(false);

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-abc")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-abc");

    let (_, headers, _) = send(&app, "GET", "/health", None).await;
    assert!(headers.contains_key("x-request-id"));
}

// ============================================================================
// Sites
// ============================================================================

#[tokio::test]
async fn test_create_site_on_seeded_directory() {
    let app = create_test_server(true);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/v1/sites",
        Some(json!({ "siteCode": "SITE003", "siteName": "Monaco Casino" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 3);
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["siteCode"], "SITE003");
    assert!(body["createdAt"].is_string());

    let (_, _, sites) = send(&app, "GET", "/api/v1/sites", None).await;
    assert_eq!(sites.as_array().unwrap().len(), 3);

    let (status, _, found) = send(&app, "GET", "/api/v1/sites/code/SITE003", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["siteName"], "Monaco Casino");
}

#[tokio::test]
async fn test_site_lookup_failures() {
    let app = create_test_server(true);

    let (status, _, body) = send(&app, "GET", "/api/v1/sites/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["error"], "Site not found");

    let (status, _, _) = send(&app, "GET", "/api/v1/sites/code/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_site_validation() {
    let app = create_test_server(false);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/v1/sites",
        Some(json!({ "siteCode": "", "siteName": "Nameless" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (_, _, sites) = send(&app, "GET", "/api/v1/sites", None).await;
    assert!(sites.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = create_test_server(false);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/sites")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "validation");
}

// ============================================================================
// Tournaments
// ============================================================================

#[tokio::test]
async fn test_create_tournament_resolves_site_and_defaults() {
    let app = create_test_server(true);

    let id = create_tournament(&app, 50).await;
    assert_eq!(id, 3);

    let (status, _, body) = send(&app, "GET", "/api/v1/tournaments/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["site"]["siteName"], "Las Vegas Main");
    assert_eq!(body["status"]["id"], 2);
    assert_eq!(body["status"]["name"], "CREATED");
    assert_eq!(body["registeredPlayers"], 0);
    assert_eq!(body["tournamentType"], "PVD");
    assert!(body.get("endTime").is_none());

    let (_, _, leaderboard) = send(&app, "GET", "/api/v1/tournaments/3/leaderboard", None).await;
    assert_eq!(leaderboard, json!([]));
}

#[tokio::test]
async fn test_create_tournament_with_flat_ids_and_unknown_site() {
    let app = create_test_server(false);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/v1/tournaments",
        Some(json!({
            "name": "Orphan Cup",
            "siteId": 42,
            "statusId": 1,
            "startingChips": 1000,
            "totalRounds": 3,
            "maxPlayers": 8,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["site"]["id"], 42);
    assert!(body["site"].get("siteName").is_none());
    assert_eq!(body["status"]["name"], "ACTIVE");
}

#[tokio::test]
async fn test_create_tournament_rejects_zero_capacity() {
    let app = create_test_server(true);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/v1/tournaments",
        Some(json!({
            "name": "Empty Room",
            "site": { "id": 1 },
            "startingChips": 1000,
            "totalRounds": 3,
            "maxPlayers": 0,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (_, _, tournaments) = send(&app, "GET", "/api/v1/tournaments", None).await;
    assert_eq!(tournaments.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_tournament_is_not_found() {
    let app = create_test_server(true);

    let (status, _, body) = send(&app, "GET", "/api/v1/tournaments/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tournament not found");

    let (status, body) = register(&app, 999, "ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

// ============================================================================
// Registrations
// ============================================================================

#[tokio::test]
async fn test_registration_capacity_over_http() {
    let app = create_test_server(true);
    let id = create_tournament(&app, 2).await;

    let (status, first) = register(&app, id, "alice").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["tournamentId"], id);
    assert!(first["registeredAt"].is_string());

    let (status, _) = register(&app, id, "bob").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, id, "carol").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "capacity");
    assert_eq!(body["error"], "Tournament is full");

    let (_, _, tournament) = send(&app, "GET", &format!("/api/v1/tournaments/{id}"), None).await;
    assert_eq!(tournament["registeredPlayers"], 2);

    let (status, _, registrations) = send(
        &app,
        "GET",
        &format!("/api/v1/tournaments/{id}/registrations"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let usernames: Vec<_> = registrations
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["username"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(usernames, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let app = create_test_server(true);
    let id = create_tournament(&app, 10).await;

    let (status, _) = register(&app, id, "alice").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, id, "alice").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "duplicate_registration");

    let (_, _, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["registrations"], 1);
}

#[tokio::test]
async fn test_registration_requires_username_and_email() {
    let app = create_test_server(true);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/v1/tournaments/1/registrations",
        Some(json!({ "username": "alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}

// ============================================================================
// Leaderboards
// ============================================================================

#[tokio::test]
async fn test_seeded_leaderboard_is_ranked() {
    let app = create_test_server(true);

    let (status, _, body) = send(&app, "GET", "/api/v1/tournaments/1/leaderboard", None).await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["username"], "PokerPro_42");
    assert_eq!(entries[0]["chipsCurrent"], 125_000);
    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry["rank"], index + 1);
    }
}

#[tokio::test]
async fn test_unknown_leaderboard_is_empty() {
    let app = create_test_server(true);

    let (status, _, body) = send(&app, "GET", "/api/v1/tournaments/999/leaderboard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_publish_leaderboard_reranks() {
    let app = create_test_server(true);
    let id = create_tournament(&app, 10).await;
    let uri = format!("/api/v1/tournaments/{id}/leaderboard");

    let (status, _, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!([
            { "username": "alice", "chipsCurrent": 9000, "totalWins": 3, "totalLosses": 1, "rank": 7 },
            { "username": "bob", "chipsCurrent": 4000, "totalWins": 1, "totalLosses": 3 },
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["rank"], 1);
    assert_eq!(body[1]["rank"], 2);

    let (_, _, stored) = send(&app, "GET", &uri, None).await;
    assert_eq!(stored, body);

    let (status, _, _) = send(
        &app,
        "PUT",
        "/api/v1/tournaments/999/leaderboard",
        Some(json!([])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
