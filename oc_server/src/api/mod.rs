//! HTTP API for the Open Classical server.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework routing requests to the managers
//! - **Tower**: Middleware for CORS and authentication
//! - **JWT**: Bearer tokens issued by the external identity provider
//!
//! # Modules
//!
//! - [`tournaments`]: Edition, history and leaderboard queries plus CSV export
//! - [`moderation`]: Director operations (ban, unban, withdraw, verify)
//! - [`results`]: Self-reported result submission
//! - [`middleware`]: Token verification for protected endpoints
//!
//! # Endpoints Overview
//!
//! ## Public (No Auth Required)
//! - `GET /health` - Server health status
//! - `GET /public/tournaments/open-classical?startsAt=` - Get an edition
//! - `GET /public/tournaments/open-classical/previous?startKey=` - List history
//! - `GET /public/tournaments/leaderboard` - Get a leaderboard
//!
//! ## Results (Anonymous or Authenticated)
//! - `POST /tournaments/open-classical/results` - Submit a self-report
//!
//! ## Admin (Auth + Role Required)
//! - `POST /tournaments/open-classical/admin/ban-player`
//! - `POST /tournaments/open-classical/admin/unban-player`
//! - `POST /tournaments/open-classical/admin/withdraw-player`
//! - `POST /tournaments/open-classical/admin/verify-result`
//! - `GET  /tournaments/open-classical/admin/registrations?region=&section=`
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production,
//! configure appropriate origins, methods, and headers.

pub mod error;
pub mod middleware;
pub mod moderation;
pub mod request_id;
pub mod results;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use open_classical::auth::AuthManager;
use open_classical::ledger::SubmitManager;
use open_classical::tournament::{ModerationManager, QueryManager};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap, the managers hold their dependencies
/// behind `Arc`).
///
/// # Fields
///
/// - `moderation`: Director operations against the current edition
/// - `queries`: Read-only edition and leaderboard retrieval
/// - `submit`: Self-reported result ingestion
/// - `auth_manager`: Bearer token verification
/// - `pool`: Database connection pool for health checks
#[derive(Clone)]
pub struct AppState {
    pub moderation: ModerationManager,
    pub queries: QueryManager,
    pub submit: SubmitManager,
    pub auth_manager: Arc<AuthManager>,
    pub pool: PgPool,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use oc_server::api::{create_router, AppState};
/// # async fn example(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8972").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    // Public read surface, no token required.
    let public_routes = Router::new()
        .route(
            "/public/tournaments/open-classical",
            get(tournaments::get_open_classical),
        )
        .route(
            "/public/tournaments/open-classical/previous",
            get(tournaments::list_previous_editions),
        )
        .route(
            "/public/tournaments/leaderboard",
            get(tournaments::get_leaderboard),
        );

    // Result submission accepts anonymous callers but still rejects
    // tokens that fail verification.
    let results_routes = Router::new()
        .route(
            "/tournaments/open-classical/results",
            post(results::submit_result),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::optional_auth,
        ));

    // Director surface behind mandatory authentication; role checks
    // happen in the moderation manager.
    let admin_routes = Router::new()
        .route(
            "/tournaments/open-classical/admin/ban-player",
            post(moderation::ban_player),
        )
        .route(
            "/tournaments/open-classical/admin/unban-player",
            post(moderation::unban_player),
        )
        .route(
            "/tournaments/open-classical/admin/withdraw-player",
            post(moderation::withdraw_player),
        )
        .route(
            "/tournaments/open-classical/admin/verify-result",
            post(moderation::verify_result),
        )
        .route(
            "/tournaments/open-classical/admin/registrations",
            get(tournaments::get_registrations),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(results_routes)
        .merge(admin_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the database answers a trivial query, or
/// `503 Service Unavailable` otherwise.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8972/health
/// # {"status":"healthy","version":"1.3.0","database":true,"timestamp":"2025-11-22T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
