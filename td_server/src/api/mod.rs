//! HTTP API for the tournament directory.
//!
//! JSON in and out, field names in camelCase and timestamps in ISO-8601.
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health
//! POST /api/v1/sites                                  - Create site
//! GET  /api/v1/sites                                  - List sites
//! GET  /api/v1/sites/{site_id}                        - Get site
//! GET  /api/v1/sites/code/{site_code}                 - Find site by code
//! POST /api/v1/tournaments                            - Create tournament
//! GET  /api/v1/tournaments                            - List tournaments
//! GET  /api/v1/tournaments/{tournament_id}            - Get tournament
//! GET  /api/v1/tournaments/{tournament_id}/leaderboard     - Ranked leaderboard
//! PUT  /api/v1/tournaments/{tournament_id}/leaderboard     - Publish standings
//! POST /api/v1/tournaments/{tournament_id}/registrations   - Register player
//! GET  /api/v1/tournaments/{tournament_id}/registrations   - List registrations
//! ```
//!
//! # Errors
//!
//! Failures answer with `{"error": "...", "kind": "..."}`:
//! validation → 400, not found → 404, capacity and duplicate
//! registration → 409.

pub mod errors;
pub mod request_id;
pub mod sites;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tournament_directory::DirectoryManager;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryManager>,
}

/// Create the complete API router.
///
/// # Arguments
///
/// - `state`: Application state
/// - `request_timeout`: Abort requests that take longer than this
///
/// # Example
///
/// ```rust,no_run
/// # use td_server::api::{create_router, AppState};
/// # use tournament_directory::DirectoryManager;
/// # use std::sync::Arc;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = AppState { directory: Arc::new(DirectoryManager::default()) };
/// let app = create_router(state, None);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState, request_timeout: Option<Duration>) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", create_v1_router())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive());

    let router = match request_timeout {
        Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
        None => router,
    };

    router.with_state(state)
}

fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/sites", get(sites::list_sites).post(sites::create_site))
        .route("/sites/{site_id}", get(sites::get_site))
        .route("/sites/code/{site_code}", get(sites::get_site_by_code))
        .route(
            "/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route("/tournaments/{tournament_id}", get(tournaments::get_tournament))
        .route(
            "/tournaments/{tournament_id}/leaderboard",
            get(tournaments::get_leaderboard).put(tournaments::publish_leaderboard),
        )
        .route(
            "/tournaments/{tournament_id}/registrations",
            get(tournaments::list_registrations).post(tournaments::register_player),
        )
}

/// Health check endpoint for monitoring and load balancers.
///
/// ```bash
/// curl http://localhost:6969/health
/// # {"status":"healthy","sites":2,"tournaments":2,"registrations":0,...}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.directory.stats().await;

    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sites": stats.sites,
        "tournaments": stats.tournaments,
        "registrations": stats.registrations,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
