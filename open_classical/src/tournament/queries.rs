//! Read-only retrieval of editions and leaderboards.

use std::sync::Arc;

use crate::db::store::TournamentStore;

use super::errors::{TournamentError, TournamentResult};
use super::models::{Edition, EditionKey, EditionPage, Leaderboard, LeaderboardSite};

/// Editions returned per page when listing history
const PREVIOUS_PAGE_SIZE: i64 = 10;

/// Query manager
///
/// Read-only surface over the tournament store; nothing here mutates
/// state or consults the authorization gate.
#[derive(Clone)]
pub struct QueryManager {
    store: Arc<dyn TournamentStore>,
}

impl QueryManager {
    /// Create a new query manager
    pub fn new(store: Arc<dyn TournamentStore>) -> Self {
        Self { store }
    }

    /// Fetch a single edition
    ///
    /// An empty `starts_at` resolves to the current edition.
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - No edition with the given key
    pub async fn get_edition(&self, starts_at: &str) -> TournamentResult<Edition> {
        let key = EditionKey::parse(starts_at);
        self.store.get_edition(&key).await
    }

    /// List completed editions, newest first
    ///
    /// The current edition is never included. `start_key` is the opaque
    /// continuation key of a previous page, passed through unchanged.
    pub async fn list_previous_editions(
        &self,
        start_key: Option<&str>,
    ) -> TournamentResult<EditionPage> {
        self.store
            .list_previous_editions(start_key, PREVIOUS_PAGE_SIZE)
            .await
    }

    /// Fetch a precomputed leaderboard
    ///
    /// `site` is optional and defaults to Lichess; the other three
    /// parameters are required. The lookup is a pure key fetch; an
    /// unknown combination is NotFound, not a validation failure.
    ///
    /// # Arguments
    ///
    /// * `site` - Optional game site, `lichess.org` or `chess.com`
    /// * `time_period` - Aggregation period, e.g. `monthly`
    /// * `tournament_type` - Tournament format, e.g. `SWISS`
    /// * `time_control` - Time control bucket, e.g. `blitz`
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - A required parameter is missing
    /// * `TournamentError::NotFound` - No leaderboard for the combination
    pub async fn get_leaderboard(
        &self,
        site: Option<&str>,
        time_period: &str,
        tournament_type: &str,
        time_control: &str,
    ) -> TournamentResult<Leaderboard> {
        if time_period.is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: timePeriod is required".to_string(),
            ));
        }
        if tournament_type.is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: tournamentType is required".to_string(),
            ));
        }
        if time_control.is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: timeControl is required".to_string(),
            ));
        }

        let site = LeaderboardSite::parse(site.unwrap_or_default());
        self.store
            .get_leaderboard(site, time_period, tournament_type, time_control)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::store::mock::MockTournamentStore;
    use crate::tournament::models::{CURRENT_EDITION, LeaderboardPlayer};

    use super::*;

    fn edition(starts_at: &str) -> Edition {
        Edition {
            starts_at: starts_at.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_edition_empty_resolves_current() {
        let store = Arc::new(
            MockTournamentStore::new()
                .with_edition(edition(CURRENT_EDITION))
                .with_edition(edition("2024-06-01")),
        );
        let queries = QueryManager::new(store);

        let current = queries.get_edition("").await.unwrap();
        assert_eq!(current.starts_at, CURRENT_EDITION);

        let dated = queries.get_edition("2024-06-01").await.unwrap();
        assert_eq!(dated.starts_at, "2024-06-01");

        let err = queries.get_edition("1999-01-01").await.unwrap_err();
        assert!(matches!(err, TournamentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_previous_excludes_current() {
        let store = Arc::new(
            MockTournamentStore::new()
                .with_edition(edition(CURRENT_EDITION))
                .with_edition(edition("2024-06-01"))
                .with_edition(edition("2024-01-01")),
        );
        let queries = QueryManager::new(store);

        let page = queries.list_previous_editions(None).await.unwrap();
        let keys: Vec<&str> = page
            .editions
            .iter()
            .map(|summary| summary.starts_at.as_str())
            .collect();
        assert_eq!(keys, vec!["2024-06-01", "2024-01-01"]);
        assert!(page.last_key.is_none());
    }

    #[tokio::test]
    async fn test_get_leaderboard_requires_parameters() {
        let queries = QueryManager::new(Arc::new(MockTournamentStore::new()));

        for (period, ttype, control, name) in [
            ("", "SWISS", "blitz", "timePeriod"),
            ("monthly", "", "blitz", "tournamentType"),
            ("monthly", "SWISS", "", "timeControl"),
        ] {
            let err = queries
                .get_leaderboard(None, period, ttype, control)
                .await
                .unwrap_err();
            match err {
                TournamentError::Validation(message) => {
                    assert_eq!(message, format!("Invalid request: {name} is required"));
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_get_leaderboard_defaults_to_lichess() {
        let players = vec![LeaderboardPlayer {
            username: "alice".to_string(),
            rating: 2100,
            score: 4.5,
        }];
        let store = Arc::new(MockTournamentStore::new().with_leaderboard(
            LeaderboardSite::Lichess,
            "monthly",
            "SWISS",
            "blitz",
            players,
        ));
        let queries = QueryManager::new(store);

        let board = queries
            .get_leaderboard(None, "monthly", "SWISS", "blitz")
            .await
            .unwrap();
        assert_eq!(board.players.len(), 1);
        assert_eq!(board.leaderboard_type, "LEADERBOARD_MONTHLY_SWISS_BLITZ");

        // chess.com boards live under their own key space.
        let err = queries
            .get_leaderboard(Some("chess.com"), "monthly", "SWISS", "blitz")
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::NotFound(_)));
    }
}
