//! Moderation operations for tournament directors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::gate::AuthorizationGate;
use crate::auth::models::Caller;
use crate::db::store::TournamentStore;
use crate::notify::ModerationNotifier;

use super::errors::{TournamentError, TournamentResult};
use super::export;
use super::models::{Edition, EditionKey, Pairing, PairingUpdate, PlayerStatus};

/// Request to verify the result of a pairing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResultRequest {
    /// Region of the section the game was played in
    #[serde(default)]
    pub region: String,
    /// Rating section the game was played in
    #[serde(default)]
    pub section: String,
    /// 1-based round the game was played in
    #[serde(default)]
    pub round: u32,
    /// Lichess username of the player with the white pieces
    #[serde(default)]
    pub white: String,
    /// Lichess username of the player with the black pieces
    #[serde(default)]
    pub black: String,
    /// Verified result of the game
    #[serde(default)]
    pub result: String,
}

/// Moderation manager
///
/// Every operation validates its input, checks the caller's role flags
/// through the authorization gate, reads the current edition, and issues
/// one targeted write against a single player record or pairing slot.
#[derive(Clone)]
pub struct ModerationManager {
    store: Arc<dyn TournamentStore>,
    gate: Arc<dyn AuthorizationGate>,
    notifier: Arc<dyn ModerationNotifier>,
}

impl ModerationManager {
    /// Create a new moderation manager
    pub fn new(
        store: Arc<dyn TournamentStore>,
        gate: Arc<dyn AuthorizationGate>,
        notifier: Arc<dyn ModerationNotifier>,
    ) -> Self {
        Self {
            store,
            gate,
            notifier,
        }
    }

    /// Ban a player from the current edition
    ///
    /// Sets the player's status to banned and records the last round the
    /// player was paired in, scanning rounds latest first.
    ///
    /// # Arguments
    ///
    /// * `caller` - Resolved identity of the requesting director
    /// * `region` - Region of the player's section
    /// * `section` - Rating section of the player's section
    /// * `username` - Account username of the player
    ///
    /// # Returns
    ///
    /// * `TournamentResult<Edition>` - The edition after the write
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - A required field is missing
    /// * `TournamentError::Unauthenticated` - Caller has no username
    /// * `TournamentError::Forbidden` - Caller is not a tournament admin
    /// * `TournamentError::NotFound` - Unknown section or player
    pub async fn ban_player(
        &self,
        caller: &Caller,
        region: &str,
        section: &str,
        username: &str,
    ) -> TournamentResult<Edition> {
        self.set_player_status(caller, region, section, username, PlayerStatus::Banned)
            .await
    }

    /// Withdraw a player from the current edition
    ///
    /// Same flow as [`ModerationManager::ban_player`] with a withdrawn
    /// status; the player remains in good standing and may register for
    /// later editions.
    pub async fn withdraw_player(
        &self,
        caller: &Caller,
        region: &str,
        section: &str,
        username: &str,
    ) -> TournamentResult<Edition> {
        self.set_player_status(caller, region, section, username, PlayerStatus::Withdrawn)
            .await
    }

    /// Restore a banned or withdrawn player to active standing
    pub async fn unban_player(
        &self,
        caller: &Caller,
        region: &str,
        section: &str,
        username: &str,
    ) -> TournamentResult<Edition> {
        self.set_player_status(caller, region, section, username, PlayerStatus::Active)
            .await
    }

    /// Verify the result of a pairing in the current edition
    ///
    /// Locates the pairing by round and the Lichess usernames of both
    /// players, comparing case-insensitively, then rewrites exactly that
    /// slot with the verified result. Already verified results are
    /// overwritten; directors use this to correct mistakes.
    ///
    /// # Arguments
    ///
    /// * `caller` - Resolved identity of the requesting director
    /// * `request` - The pairing coordinates and verified result
    ///
    /// # Returns
    ///
    /// * `TournamentResult<Edition>` - The edition after the write
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - Missing field, round out of
    ///   range, or no pairing matches the given players
    /// * `TournamentError::Unauthenticated` - Caller has no username
    /// * `TournamentError::Forbidden` - Caller is not a tournament admin
    /// * `TournamentError::NotFound` - Unknown region/section combination
    pub async fn verify_result(
        &self,
        caller: &Caller,
        request: &VerifyResultRequest,
    ) -> TournamentResult<Edition> {
        let region = request.region.trim();
        let section_name = request.section.trim();
        let white = request.white.trim();
        let black = request.black.trim();
        let result = request.result.trim();

        require(region, "region")?;
        require(section_name, "section")?;
        if request.round == 0 {
            return Err(TournamentError::Validation(
                "Invalid request: round is required".to_string(),
            ));
        }
        require(white, "white")?;
        require(black, "black")?;
        require(result, "result")?;
        self.authorize(caller).await?;

        let edition = self.store.get_edition(&EditionKey::Current).await?;
        let section = edition.section(region, section_name).ok_or_else(|| {
            TournamentError::NotFound(format!(
                "Invalid request: region/section combo `{region}/{section_name}` does not exist"
            ))
        })?;

        let round = request.round as usize;
        let round_count = section.rounds.len();
        if round > round_count {
            return Err(TournamentError::Validation(format!(
                "Invalid request: round must be between 1 and {round_count}"
            )));
        }
        let round_index = round - 1;

        let (pairing_index, matched) = section
            .find_pairing(round_index, white, black)
            .ok_or_else(|| {
                TournamentError::Validation(format!(
                    "Invalid request: round {round} does not contain a pairing for \
                     {white} (white) vs {black} (black)"
                ))
            })?;

        let update = PairingUpdate {
            region: region.to_string(),
            section: section_name.to_string(),
            round_index,
            pairing_index,
            overwrite_verified: true,
            pairing: Pairing {
                white: matched.white.clone(),
                black: matched.black.clone(),
                result: result.to_string(),
                game_url: matched.game_url.clone(),
                verified: true,
                report_opponent: matched.report_opponent,
                notes: matched.notes.clone(),
            },
        };
        self.store
            .update_pairing(&EditionKey::Current, &update)
            .await?;

        // The write has committed; a failed notification must not fail
        // the operation.
        if let Err(err) = self.notifier.result_verified(&update).await {
            log::warn!("Failed to send verification notification: {err}");
        }

        self.store.get_edition(&EditionKey::Current).await
    }

    /// Export the registration list of a section as CSV
    ///
    /// Rows are ordered by ascending account username so repeated exports
    /// of the same section are identical.
    pub async fn export_registrations(
        &self,
        caller: &Caller,
        region: &str,
        section: &str,
    ) -> TournamentResult<String> {
        let region = region.trim();
        let section_name = section.trim();
        require(region, "region")?;
        require(section_name, "section")?;
        self.authorize(caller).await?;

        let edition = self.store.get_edition(&EditionKey::Current).await?;
        let section = edition.section(region, section_name).ok_or_else(|| {
            TournamentError::NotFound(format!(
                "Invalid request: region/section combo `{region}/{section_name}` does not exist"
            ))
        })?;

        Ok(export::registrations_csv(section))
    }

    /// Check that the caller exists and holds a moderation role
    async fn authorize(&self, caller: &Caller) -> TournamentResult<()> {
        if caller.username.is_empty() {
            return Err(TournamentError::Unauthenticated(
                "Invalid request: username is required".to_string(),
            ));
        }
        let flags = self.gate.check(&caller.username).await?;
        if !flags.can_moderate() {
            return Err(TournamentError::Forbidden(
                "Invalid request: you are not a tournament admin".to_string(),
            ));
        }
        Ok(())
    }

    /// Shared flow for the three status mutations
    async fn set_player_status(
        &self,
        caller: &Caller,
        region: &str,
        section: &str,
        username: &str,
        status: PlayerStatus,
    ) -> TournamentResult<Edition> {
        let region = region.trim();
        let section_name = section.trim();
        let username = username.trim();
        require(region, "region")?;
        require(section_name, "section")?;
        require(username, "username")?;
        self.authorize(caller).await?;

        let edition = self.store.get_edition(&EditionKey::Current).await?;
        let section = edition.section(region, section_name).ok_or_else(|| {
            TournamentError::NotFound(format!(
                "Invalid request: region/section combo `{region}/{section_name}` does not exist"
            ))
        })?;
        let mut player = section.players.get(username).cloned().ok_or_else(|| {
            TournamentError::NotFound("Invalid request: player does not exist".to_string())
        })?;

        player.status = status;
        player.last_active_round = match status {
            PlayerStatus::Active => 0,
            _ => section.last_active_round(username),
        };
        self.store.set_player(&EditionKey::Current, &player).await?;
        log::info!("Set status {status} for player {username} in {region}_{section_name}");

        self.store.get_edition(&EditionKey::Current).await
    }
}

fn require(value: &str, name: &str) -> TournamentResult<()> {
    if value.is_empty() {
        return Err(TournamentError::Validation(format!(
            "Invalid request: {name} is required"
        )));
    }
    Ok(())
}
