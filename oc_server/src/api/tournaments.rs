//! Tournament query handlers.
//!
//! Public read endpoints for editions, history and leaderboards, plus
//! the director-only registration export.
//!
//! # Examples
//!
//! Fetch the current edition:
//! ```bash
//! curl http://localhost:8972/public/tournaments/open-classical
//! ```
//!
//! Export a section's registrations:
//! ```bash
//! curl http://localhost:8972/tournaments/open-classical/admin/registrations?region=A&section=Open \
//!   -H "Authorization: Bearer TOKEN"
//! ```

use axum::{
    Json,
    extract::{Extension, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use open_classical::auth::Caller;
use open_classical::tournament::{Edition, EditionPage, Leaderboard};
use serde::Deserialize;

use super::AppState;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEditionParams {
    /// Start date of the edition; empty or absent selects the current one
    #[serde(default)]
    pub starts_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousParams {
    /// Continuation key returned by the previous page
    #[serde(default)]
    pub start_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub time_period: Option<String>,
    #[serde(default)]
    pub tournament_type: Option<String>,
    #[serde(default)]
    pub time_control: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegistrationsParams {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

/// Get a single edition.
///
/// Without a `startsAt` query parameter this returns the in-progress
/// edition. Player contact emails are never serialized.
///
/// # Errors
///
/// - `404 Not Found`: No edition with the given start date
pub async fn get_open_classical(
    State(state): State<AppState>,
    Query(params): Query<GetEditionParams>,
) -> Result<Json<Edition>, ApiError> {
    let starts_at = params.starts_at.as_deref().unwrap_or_default();
    let edition = state.queries.get_edition(starts_at).await?;
    Ok(Json(edition))
}

/// List completed editions, newest first.
///
/// Returns up to one page of edition summaries and, when more remain, a
/// `lastKey` to pass back as `startKey`.
pub async fn list_previous_editions(
    State(state): State<AppState>,
    Query(params): Query<PreviousParams>,
) -> Result<Json<EditionPage>, ApiError> {
    let page = state
        .queries
        .list_previous_editions(params.start_key.as_deref())
        .await?;
    Ok(Json(page))
}

/// Get a precomputed leaderboard.
///
/// `timePeriod`, `tournamentType` and `timeControl` are required;
/// `site` defaults to lichess.org.
///
/// # Errors
///
/// - `400 Bad Request`: A required query parameter is missing
/// - `404 Not Found`: No leaderboard matches the combination
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<Leaderboard>, ApiError> {
    let leaderboard = state
        .queries
        .get_leaderboard(
            params.site.as_deref(),
            params.time_period.as_deref().unwrap_or_default(),
            params.tournament_type.as_deref().unwrap_or_default(),
            params.time_control.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(leaderboard))
}

/// Download a section's registration list as CSV.
///
/// Requires a tournament admin caller. The response carries a
/// `Content-Disposition` attachment named after the section.
pub async fn get_registrations(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<RegistrationsParams>,
) -> Result<Response, ApiError> {
    let region = params.region.unwrap_or_default();
    let section = params.section.unwrap_or_default();
    let csv = state
        .moderation
        .export_registrations(&caller, &region, &section)
        .await?;

    let disposition = format!("attachment; filename=\"{region}_{section}_Registrations.csv\"");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
