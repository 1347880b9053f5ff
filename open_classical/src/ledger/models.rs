//! Result ledger data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A self-reported game result, as submitted by a participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    /// Contact email of the submitter; may be blank for signed-in
    /// callers whose token carries an email
    #[serde(default)]
    pub email: String,
    /// Section key the game was played in
    #[serde(default)]
    pub section: String,
    /// 1-based round the game was played in
    #[serde(default)]
    pub round: u32,
    /// URL of the game
    #[serde(default)]
    pub game_url: String,
    /// Lichess username of the player with the white pieces
    #[serde(default)]
    pub white: String,
    /// Lichess username of the player with the black pieces
    #[serde(default)]
    pub black: String,
    /// Reported result of the game
    #[serde(default)]
    pub result: String,
    /// Whether the submitter reports the opponent for failure to
    /// schedule or show up
    #[serde(default)]
    pub report_opponent: bool,
    /// Free-form notes for the tournament directors
    #[serde(default)]
    pub notes: String,
}

/// One appended ledger record.
///
/// The ledger is an append-only review queue: records never feed back
/// into tournament state until a director promotes them through result
/// verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultReport {
    /// When the report was accepted
    pub submitted_at: DateTime<Utc>,
    /// Contact email of the submitter
    pub email: String,
    /// Section key the game was played in
    pub section: String,
    /// 1-based round the game was played in
    pub round: i32,
    /// URL of the game
    pub game_url: String,
    /// Lichess username of the player with the white pieces
    pub white: String,
    /// Lichess username of the player with the black pieces
    pub black: String,
    /// Reported result of the game
    pub result: String,
    /// Whether the submitter reported the opponent
    pub report_opponent: bool,
    /// Free-form notes for the tournament directors
    pub notes: String,
    /// Whether the result arrived pre-verified; always false for
    /// self-reports
    pub verified: bool,
}
