//! Tournament store trait and PostgreSQL implementation.
//!
//! The store is the trait seam between the tournament managers and the
//! database, enabling dependency injection and mock-backed tests.
//!
//! Editions are stored normalized: one row per edition, section, player
//! and pairing slot. Mutations target exactly one player row or one
//! `(round_index, pairing_index)` slot so concurrent updates to other
//! entities in the same section are never lost.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::tournament::errors::{TournamentError, TournamentResult};
use crate::tournament::models::{
    CURRENT_EDITION, Edition, EditionKey, EditionPage, EditionSummary, Leaderboard,
    LeaderboardPlayer, LeaderboardSite, Pairing, PairingUpdate, Player, PlayerStatus,
    PlayerSummary, Round, Section, section_key,
};

const EDITION_NOT_FOUND: &str = "Invalid request: open classical not found";
const PLAYER_NOT_FOUND: &str = "Invalid request: player does not exist";
const LEADERBOARD_NOT_FOUND: &str = "Invalid request: leaderboard not found";
const PAIRING_CONFLICT: &str =
    "This pairing does not exist or its result has already been verified. Contact the TD to change it.";

/// Trait for tournament storage operations
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Fetch a full edition with its sections, players and rounds
    async fn get_edition(&self, key: &EditionKey) -> TournamentResult<Edition>;

    /// List completed editions, newest first
    ///
    /// `start_key` is the continuation key returned by a previous page.
    async fn list_previous_editions(
        &self,
        start_key: Option<&str>,
        limit: i64,
    ) -> TournamentResult<EditionPage>;

    /// Replace one player record within its section
    ///
    /// The write targets only the addressed player row; it fails with
    /// `NotFound` if the player is not registered in the edition.
    async fn set_player(&self, key: &EditionKey, player: &Player) -> TournamentResult<()>;

    /// Replace one pairing slot within a round
    ///
    /// A slot whose result is already verified is only overwritten when
    /// the update sets `overwrite_verified`.
    async fn update_pairing(
        &self,
        key: &EditionKey,
        update: &PairingUpdate,
    ) -> TournamentResult<()>;

    /// Fetch a precomputed leaderboard by its lookup values
    async fn get_leaderboard(
        &self,
        site: LeaderboardSite,
        time_period: &str,
        tournament_type: &str,
        time_control: &str,
    ) -> TournamentResult<Leaderboard>;
}

/// Default PostgreSQL implementation of `TournamentStore`
pub struct PgTournamentStore {
    pool: PgPool,
}

impl PgTournamentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pairing_from_row(row: &sqlx::postgres::PgRow) -> TournamentResult<Pairing> {
        let white: PlayerSummary = serde_json::from_value(row.get("white"))?;
        let black: PlayerSummary = serde_json::from_value(row.get("black"))?;
        Ok(Pairing {
            white,
            black,
            result: row.get("result"),
            game_url: row.get("game_url"),
            verified: row.get("verified"),
            report_opponent: row.get("report_opponent"),
            notes: row.get("notes"),
        })
    }

    fn player_from_row(row: &sqlx::postgres::PgRow) -> Player {
        Player {
            username: row.get("username"),
            display_name: row.get("display_name"),
            lichess_username: row.get("lichess_username"),
            discord_username: row.get("discord_username"),
            title: row.get("title"),
            rating: row.get("rating"),
            email: row.get("email"),
            region: row.get("region"),
            section: row.get("section"),
            bye_requests: row.get("bye_requests"),
            status: PlayerStatus::parse(row.get("status")),
            last_active_round: row.get("last_active_round"),
        }
    }
}

#[async_trait]
impl TournamentStore for PgTournamentStore {
    async fn get_edition(&self, key: &EditionKey) -> TournamentResult<Edition> {
        let edition_row = sqlx::query(
            "SELECT starts_at, name, accepting_registrations, start_month, registration_close
             FROM editions WHERE starts_at = $1",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TournamentError::NotFound(EDITION_NOT_FOUND.to_string()))?;

        let mut edition = Edition {
            starts_at: edition_row.get("starts_at"),
            name: edition_row.get("name"),
            accepting_registrations: edition_row.get("accepting_registrations"),
            sections: BTreeMap::new(),
            start_month: edition_row.get("start_month"),
            registration_close: edition_row.get("registration_close"),
        };

        let section_rows = sqlx::query(
            "SELECT section_key, name, region, section FROM sections
             WHERE edition_starts_at = $1",
        )
        .bind(key.as_str())
        .fetch_all(&self.pool)
        .await?;

        for row in section_rows {
            let section = Section {
                name: row.get("name"),
                region: row.get("region"),
                section: row.get("section"),
                players: BTreeMap::new(),
                rounds: Vec::new(),
            };
            edition.sections.insert(row.get("section_key"), section);
        }

        let player_rows = sqlx::query(
            "SELECT section_key, username, display_name, lichess_username, discord_username,
                    title, rating, email, region, section, bye_requests, status, last_active_round
             FROM section_players WHERE edition_starts_at = $1",
        )
        .bind(key.as_str())
        .fetch_all(&self.pool)
        .await?;

        for row in player_rows {
            let player = Self::player_from_row(&row);
            if let Some(section) = edition.sections.get_mut(row.get::<String, _>("section_key").as_str()) {
                section.players.insert(player.username.clone(), player);
            }
        }

        let pairing_rows = sqlx::query(
            "SELECT section_key, round_index, pairing_index, white, black, result, game_url,
                    verified, report_opponent, notes
             FROM section_pairings WHERE edition_starts_at = $1
             ORDER BY section_key, round_index, pairing_index",
        )
        .bind(key.as_str())
        .fetch_all(&self.pool)
        .await?;

        for row in pairing_rows {
            let pairing = Self::pairing_from_row(&row)?;
            let round_index = row.get::<i32, _>("round_index") as usize;
            if let Some(section) = edition.sections.get_mut(row.get::<String, _>("section_key").as_str()) {
                while section.rounds.len() <= round_index {
                    section.rounds.push(Round::default());
                }
                section.rounds[round_index].pairings.push(pairing);
            }
        }

        Ok(edition)
    }

    async fn list_previous_editions(
        &self,
        start_key: Option<&str>,
        limit: i64,
    ) -> TournamentResult<EditionPage> {
        let rows = sqlx::query(
            "SELECT starts_at, name FROM editions
             WHERE starts_at <> $1 AND ($2::TEXT IS NULL OR starts_at < $2::TEXT)
             ORDER BY starts_at DESC LIMIT $3",
        )
        .bind(CURRENT_EDITION)
        .bind(start_key)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let editions: Vec<EditionSummary> = rows
            .iter()
            .map(|row| EditionSummary {
                starts_at: row.get("starts_at"),
                name: row.get("name"),
            })
            .collect();

        let last_key = if editions.len() as i64 == limit {
            editions.last().map(|e| e.starts_at.clone())
        } else {
            None
        };

        Ok(EditionPage { editions, last_key })
    }

    async fn set_player(&self, key: &EditionKey, player: &Player) -> TournamentResult<()> {
        let result = sqlx::query(
            "UPDATE section_players
             SET display_name = $4, lichess_username = $5, discord_username = $6, title = $7,
                 rating = $8, email = $9, bye_requests = $10, status = $11, last_active_round = $12
             WHERE edition_starts_at = $1 AND section_key = $2 AND username = $3",
        )
        .bind(key.as_str())
        .bind(section_key(&player.region, &player.section))
        .bind(&player.username)
        .bind(&player.display_name)
        .bind(&player.lichess_username)
        .bind(&player.discord_username)
        .bind(&player.title)
        .bind(player.rating)
        .bind(&player.email)
        .bind(&player.bye_requests)
        .bind(player.status.to_string())
        .bind(player.last_active_round)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TournamentError::NotFound(PLAYER_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn update_pairing(
        &self,
        key: &EditionKey,
        update: &PairingUpdate,
    ) -> TournamentResult<()> {
        let white = serde_json::to_value(&update.pairing.white)?;
        let black = serde_json::to_value(&update.pairing.black)?;

        let result = sqlx::query(
            "UPDATE section_pairings
             SET white = $5, black = $6, result = $7, game_url = $8, verified = $9,
                 report_opponent = $10, notes = $11
             WHERE edition_starts_at = $1 AND section_key = $2
               AND round_index = $3 AND pairing_index = $4
               AND (verified = FALSE OR $12)",
        )
        .bind(key.as_str())
        .bind(section_key(&update.region, &update.section))
        .bind(update.round_index as i32)
        .bind(update.pairing_index as i32)
        .bind(white)
        .bind(black)
        .bind(&update.pairing.result)
        .bind(&update.pairing.game_url)
        .bind(update.pairing.verified)
        .bind(update.pairing.report_opponent)
        .bind(&update.pairing.notes)
        .bind(update.overwrite_verified)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TournamentError::Validation(PAIRING_CONFLICT.to_string()));
        }
        Ok(())
    }

    async fn get_leaderboard(
        &self,
        site: LeaderboardSite,
        time_period: &str,
        tournament_type: &str,
        time_control: &str,
    ) -> TournamentResult<Leaderboard> {
        let row = sqlx::query(
            "SELECT players FROM leaderboards
             WHERE site = $1 AND time_period = $2 AND tournament_type = $3 AND time_control = $4",
        )
        .bind(site.to_string())
        .bind(time_period.to_uppercase())
        .bind(tournament_type.to_uppercase())
        .bind(time_control.to_uppercase())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TournamentError::NotFound(LEADERBOARD_NOT_FOUND.to_string()))?;

        let players: Vec<LeaderboardPlayer> = serde_json::from_value(row.get("players"))?;

        Ok(Leaderboard {
            leaderboard_type: Leaderboard::type_key(site, time_period, tournament_type, time_control),
            starts_at: CURRENT_EDITION.to_string(),
            site,
            time_control: time_control.to_uppercase(),
            players,
        })
    }
}
