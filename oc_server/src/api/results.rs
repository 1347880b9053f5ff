//! Self-reported result submission.

use axum::{
    Json,
    extract::{Extension, State},
};
use open_classical::auth::Caller;
use open_classical::ledger::{ResultReport, SubmitResultRequest};

use super::AppState;
use super::error::ApiError;

/// Submit a self-reported game result.
///
/// Open to anonymous callers; a signed-in caller with a blank request
/// email has their account email filled in. The report lands in the
/// review ledger and never touches tournament state directly.
///
/// # Errors
///
/// - `400 Bad Request`: A required field is missing after trimming
/// - `401 Unauthorized`: A bearer token was sent but failed verification
pub async fn submit_result(
    State(state): State<AppState>,
    caller: Option<Extension<Caller>>,
    Json(request): Json<SubmitResultRequest>,
) -> Result<Json<ResultReport>, ApiError> {
    let caller = caller.map(|Extension(caller)| caller);
    let report = state.submit.submit_result(caller.as_ref(), request).await?;
    Ok(Json(report))
}
