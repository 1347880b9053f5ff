//! Moderation handlers for tournament directors.
//!
//! All endpoints here sit behind the authentication middleware and
//! additionally require the caller to hold an admin or tournament admin
//! role; the role check happens inside the moderation manager.
//!
//! Every successful mutation returns the full updated edition so admin
//! UIs can refresh in one round trip.

use axum::{
    Json,
    extract::{Extension, State},
};
use open_classical::auth::Caller;
use open_classical::tournament::{Edition, VerifyResultRequest};
use serde::Deserialize;

use super::AppState;
use super::error::ApiError;

/// Target of a player status change
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerModerationRequest {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub username: String,
}

/// Ban a player from the current edition.
///
/// # Errors
///
/// - `400 Bad Request`: Missing field
/// - `403 Forbidden`: Caller is not a tournament admin
/// - `404 Not Found`: Unknown section or player
pub async fn ban_player(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<PlayerModerationRequest>,
) -> Result<Json<Edition>, ApiError> {
    let edition = state
        .moderation
        .ban_player(&caller, &request.region, &request.section, &request.username)
        .await?;
    Ok(Json(edition))
}

/// Restore a banned or withdrawn player to active standing.
pub async fn unban_player(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<PlayerModerationRequest>,
) -> Result<Json<Edition>, ApiError> {
    let edition = state
        .moderation
        .unban_player(&caller, &request.region, &request.section, &request.username)
        .await?;
    Ok(Json(edition))
}

/// Withdraw a player from the current edition.
pub async fn withdraw_player(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<PlayerModerationRequest>,
) -> Result<Json<Edition>, ApiError> {
    let edition = state
        .moderation
        .withdraw_player(&caller, &request.region, &request.section, &request.username)
        .await?;
    Ok(Json(edition))
}

/// Verify the result of a pairing.
///
/// Overwrites any previously verified result for the slot; directors
/// use this both to confirm self-reports and to correct mistakes.
///
/// # Errors
///
/// - `400 Bad Request`: Missing field, round out of range, or no
///   pairing matches the given players
/// - `403 Forbidden`: Caller is not a tournament admin
pub async fn verify_result(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<VerifyResultRequest>,
) -> Result<Json<Edition>, ApiError> {
    let edition = state.moderation.verify_result(&caller, &request).await?;
    Ok(Json(edition))
}
