//! Data models for Open Classical tournament editions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Storage value marking the edition that is currently open or in progress.
pub const CURRENT_EDITION: &str = "CURRENT";

/// Key selecting a tournament edition.
///
/// An edition is addressed either by the start date of a completed
/// tournament (e.g. `"2025-05"`) or by the `CURRENT` sentinel for the
/// edition that is still open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditionKey {
    /// The open or in-progress edition
    Current,
    /// A completed edition, addressed by its start date
    Dated(String),
}

impl EditionKey {
    /// Parse a caller-supplied `startsAt` value.
    ///
    /// An empty string selects the current edition, matching the query
    /// parameter convention of the public API.
    pub fn parse(starts_at: &str) -> Self {
        if starts_at.is_empty() || starts_at == CURRENT_EDITION {
            EditionKey::Current
        } else {
            EditionKey::Dated(starts_at.to_string())
        }
    }

    /// Storage representation of the key
    pub fn as_str(&self) -> &str {
        match self {
            EditionKey::Current => CURRENT_EDITION,
            EditionKey::Dated(starts_at) => starts_at,
        }
    }
}

impl std::fmt::Display for EditionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One Open Classical tournament edition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    /// Start of the period the edition applies to, or `CURRENT`
    pub starts_at: String,
    /// Name of a completed edition, empty while the edition is running
    #[serde(default)]
    pub name: String,
    /// Whether the edition is accepting registrations
    #[serde(default)]
    pub accepting_registrations: bool,
    /// Sections in the edition, keyed by `region_section`
    #[serde(default)]
    pub sections: BTreeMap<String, Section>,
    /// Month the edition started, in ISO format; internal only
    #[serde(skip)]
    pub start_month: String,
    /// Date registrations close, empty once registration has closed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub registration_close: String,
}

impl Edition {
    /// Look up a section by its `region_section` key
    pub fn section(&self, region: &str, section: &str) -> Option<&Section> {
        self.sections.get(&section_key(region, section))
    }
}

/// Composite key identifying a section within an edition.
pub fn section_key(region: &str, section: &str) -> String {
    format!("{region}_{section}")
}

/// A section of an edition, one region and rating range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Display name of the section
    pub name: String,
    /// Region of the section
    pub region: String,
    /// Rating range of the section
    pub section: String,
    /// Players in the section, keyed by their account username
    #[serde(default)]
    pub players: BTreeMap<String, Player>,
    /// Rounds played so far, index 0 is round 1
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Section {
    /// Composite `region_section` key of this section
    pub fn key(&self) -> String {
        section_key(&self.region, &self.section)
    }

    /// Highest 1-based round number in which the player appears in a
    /// pairing, or 0 if the player was never paired.
    ///
    /// Rounds are scanned latest first, so the first hit is the answer.
    pub fn last_active_round(&self, username: &str) -> i32 {
        for (idx, round) in self.rounds.iter().enumerate().rev() {
            let paired = round
                .pairings
                .iter()
                .any(|p| p.white.username == username || p.black.username == username);
            if paired {
                return (idx + 1) as i32;
            }
        }
        0
    }

    /// Find the pairing in the given 0-based round whose white and black
    /// Lichess usernames both match, comparing case-insensitively.
    ///
    /// Returns the pairing index within the round alongside the pairing.
    /// The first match wins.
    pub fn find_pairing(
        &self,
        round_index: usize,
        white: &str,
        black: &str,
    ) -> Option<(usize, &Pairing)> {
        let white = white.to_lowercase();
        let black = black.to_lowercase();
        self.rounds.get(round_index)?.pairings.iter().enumerate().find(|(_, p)| {
            p.white.lichess_username.to_lowercase() == white
                && p.black.lichess_username.to_lowercase() == black
        })
    }
}

/// A single round within a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Pairings of the round, index is the pairing slot
    #[serde(default)]
    pub pairings: Vec<Pairing>,
}

/// A single pairing within a round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    /// The player with the white pieces
    pub white: PlayerSummary,
    /// The player with the black pieces
    pub black: PlayerSummary,
    /// Result of the game, empty if unplayed
    #[serde(default)]
    pub result: String,
    /// URL of the game that was played
    #[serde(default)]
    pub game_url: String,
    /// Whether the result has been verified
    #[serde(default)]
    pub verified: bool,
    /// Whether the submitter reported the opponent for failure to
    /// schedule or show up
    #[serde(default)]
    pub report_opponent: bool,
    /// Notes included by the submitter
    #[serde(default)]
    pub notes: String,
}

/// The minimum information needed to schedule a game with a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    /// Account username of the player
    pub username: String,
    /// Display name of the player
    #[serde(default)]
    pub display_name: String,
    /// Lichess username of the player
    #[serde(default)]
    pub lichess_username: String,
    /// Discord username of the player
    #[serde(default)]
    pub discord_username: String,
    /// The player's title, if they have one
    #[serde(default)]
    pub title: String,
    /// The player's Lichess rating at the start of the edition
    #[serde(default)]
    pub rating: i32,
}

/// Standing of a player within an edition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    /// Registered and eligible to be paired
    #[default]
    Active,
    /// Withdrew from the edition
    Withdrawn,
    /// Not in good standing, cannot register again
    Banned,
}

impl PlayerStatus {
    /// Parse a stored status value, treating unknown values as active
    pub fn parse(value: &str) -> Self {
        match value {
            "WITHDRAWN" => PlayerStatus::Withdrawn,
            "BANNED" => PlayerStatus::Banned,
            _ => PlayerStatus::Active,
        }
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            PlayerStatus::Active => "ACTIVE",
            PlayerStatus::Withdrawn => "WITHDRAWN",
            PlayerStatus::Banned => "BANNED",
        };
        write!(f, "{value}")
    }
}

/// Full registration record of a player in a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Account username of the player
    pub username: String,
    /// Display name of the player
    #[serde(default)]
    pub display_name: String,
    /// Lichess username of the player
    #[serde(default)]
    pub lichess_username: String,
    /// Discord username of the player
    #[serde(default)]
    pub discord_username: String,
    /// The player's title, if they have one
    #[serde(default)]
    pub title: String,
    /// The player's Lichess rating at the start of the edition
    #[serde(default)]
    pub rating: i32,
    /// Contact email of the player, never exposed on the public API
    #[serde(skip)]
    pub email: String,
    /// Region the player registered for
    #[serde(default)]
    pub region: String,
    /// Rating section the player registered for
    #[serde(default)]
    pub section: String,
    /// Requested byes, index `i` is a bye request for round `i + 1`
    #[serde(default)]
    pub bye_requests: Vec<bool>,
    /// Standing of the player in this edition
    #[serde(default)]
    pub status: PlayerStatus,
    /// Last 1-based round the player was active in, 0 if never paired;
    /// meaningful once the player is withdrawn or banned
    #[serde(default)]
    pub last_active_round: i32,
}

impl Player {
    /// Whether the player requested a bye for the given 1-based round.
    ///
    /// Bye requests recorded before later rounds existed may be shorter
    /// than the round list, so a missing index means no request.
    pub fn requested_bye(&self, round: usize) -> bool {
        round >= 1 && self.bye_requests.get(round - 1).copied().unwrap_or(false)
    }

    /// The scheduling summary of this player
    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            lichess_username: self.lichess_username.clone(),
            discord_username: self.discord_username.clone(),
            title: self.title.clone(),
            rating: self.rating,
        }
    }
}

/// A targeted update of one pairing slot.
///
/// Carries the full replacement pairing; the write must touch only the
/// addressed `(round_index, pairing_index)` slot so that concurrent
/// updates to other pairings or players are never lost.
#[derive(Debug, Clone)]
pub struct PairingUpdate {
    /// Region of the target section
    pub region: String,
    /// Rating section of the target section
    pub section: String,
    /// 0-based round index of the target slot
    pub round_index: usize,
    /// Pairing slot within the round
    pub pairing_index: usize,
    /// Whether an already verified pairing may be overwritten
    pub overwrite_verified: bool,
    /// Replacement value for the slot
    pub pairing: Pairing,
}

/// Listing entry for a completed edition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionSummary {
    /// Start of the period the edition applied to
    pub starts_at: String,
    /// Name of the edition
    pub name: String,
}

/// One page of completed editions, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionPage {
    /// The editions on this page
    pub editions: Vec<EditionSummary>,
    /// Continuation key for the next page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_key: Option<String>,
}

/// Site a leaderboard applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaderboardSite {
    /// lichess.org
    #[default]
    #[serde(rename = "lichess.org")]
    Lichess,
    /// chess.com
    #[serde(rename = "chess.com")]
    Chesscom,
}

impl LeaderboardSite {
    /// Parse a caller-supplied site value, defaulting to Lichess
    pub fn parse(value: &str) -> Self {
        match value {
            "chess.com" => LeaderboardSite::Chesscom,
            _ => LeaderboardSite::Lichess,
        }
    }
}

impl std::fmt::Display for LeaderboardSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            LeaderboardSite::Lichess => "lichess.org",
            LeaderboardSite::Chesscom => "chess.com",
        };
        write!(f, "{value}")
    }
}

/// A single player in a tournament leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardPlayer {
    /// Lichess or Chess.com username of the player
    pub username: String,
    /// Lichess or Chess.com rating of the player
    pub rating: i32,
    /// Score of the player in this leaderboard
    pub score: f32,
}

/// A precomputed tournament leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    /// Composite lookup key of the leaderboard
    #[serde(rename = "type")]
    pub leaderboard_type: String,
    /// Start of the period the leaderboard applies to, or `CURRENT`
    pub starts_at: String,
    /// Site the leaderboard applies to
    pub site: LeaderboardSite,
    /// Time control of the leaderboard
    pub time_control: String,
    /// Players in the leaderboard, sorted by score
    pub players: Vec<LeaderboardPlayer>,
}

impl Leaderboard {
    /// Build the composite lookup key for a leaderboard.
    ///
    /// The key follows the format
    /// `LEADERBOARD(_CHESSCOM)_(MONTHLY|YEARLY)_(ARENA|SWISS|...)_(BLITZ|RAPID|CLASSICAL)`
    /// with all segments uppercased.
    pub fn type_key(
        site: LeaderboardSite,
        time_period: &str,
        tournament_type: &str,
        time_control: &str,
    ) -> String {
        let site_prefix = match site {
            LeaderboardSite::Lichess => "",
            LeaderboardSite::Chesscom => "_CHESSCOM",
        };
        format!(
            "LEADERBOARD{}_{}_{}_{}",
            site_prefix,
            time_period.to_uppercase(),
            tournament_type.to_uppercase(),
            time_control.to_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairing(white: &str, black: &str) -> Pairing {
        Pairing {
            white: PlayerSummary {
                username: white.to_string(),
                lichess_username: white.to_string(),
                ..Default::default()
            },
            black: PlayerSummary {
                username: black.to_string(),
                lichess_username: black.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn section_with_rounds(rounds: Vec<Round>) -> Section {
        Section {
            name: "Open".to_string(),
            region: "A".to_string(),
            section: "Open".to_string(),
            players: BTreeMap::new(),
            rounds,
        }
    }

    #[test]
    fn test_edition_key_parse() {
        assert_eq!(EditionKey::parse(""), EditionKey::Current);
        assert_eq!(EditionKey::parse("CURRENT"), EditionKey::Current);
        assert_eq!(
            EditionKey::parse("2025-05"),
            EditionKey::Dated("2025-05".to_string())
        );
        assert_eq!(EditionKey::Current.as_str(), "CURRENT");
        assert_eq!(EditionKey::Dated("2025-05".to_string()).as_str(), "2025-05");
    }

    #[test]
    fn test_last_active_round_picks_latest_appearance() {
        let section = section_with_rounds(vec![
            Round {
                pairings: vec![pairing("alice", "bob")],
            },
            Round {
                pairings: vec![pairing("alice", "carol")],
            },
            Round {
                pairings: vec![pairing("carol", "bob")],
            },
        ]);
        assert_eq!(section.last_active_round("alice"), 2);
        assert_eq!(section.last_active_round("bob"), 3);
        assert_eq!(section.last_active_round("carol"), 3);
    }

    #[test]
    fn test_last_active_round_unpaired_player_is_zero() {
        let section = section_with_rounds(vec![Round {
            pairings: vec![pairing("alice", "bob")],
        }]);
        assert_eq!(section.last_active_round("dave"), 0);
        assert_eq!(section_with_rounds(vec![]).last_active_round("alice"), 0);
    }

    #[test]
    fn test_find_pairing_is_case_insensitive() {
        let section = section_with_rounds(vec![Round {
            pairings: vec![pairing("bob", "alice")],
        }]);
        let (idx, found) = section.find_pairing(0, "Bob", "ALICE").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(found.white.lichess_username, "bob");
        assert!(section.find_pairing(0, "alice", "bob").is_none());
        assert!(section.find_pairing(1, "bob", "alice").is_none());
    }

    #[test]
    fn test_find_pairing_first_match_wins() {
        let mut first = pairing("bob", "alice");
        first.result = "1-0".to_string();
        let second = pairing("BOB", "ALICE");
        let section = section_with_rounds(vec![Round {
            pairings: vec![first, second],
        }]);
        let (idx, found) = section.find_pairing(0, "bob", "alice").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(found.result, "1-0");
    }

    #[test]
    fn test_requested_bye_out_of_range_is_false() {
        let player = Player {
            username: "alice".to_string(),
            bye_requests: vec![true, false, true],
            ..Default::default()
        };
        assert!(player.requested_bye(1));
        assert!(!player.requested_bye(2));
        assert!(player.requested_bye(3));
        assert!(!player.requested_bye(4));
        assert!(!player.requested_bye(0));
    }

    #[test]
    fn test_player_status_round_trip() {
        for status in [
            PlayerStatus::Active,
            PlayerStatus::Withdrawn,
            PlayerStatus::Banned,
        ] {
            assert_eq!(PlayerStatus::parse(&status.to_string()), status);
        }
        assert_eq!(PlayerStatus::parse(""), PlayerStatus::Active);
        assert_eq!(PlayerStatus::parse("unknown"), PlayerStatus::Active);
    }

    #[test]
    fn test_player_serialization_hides_email() {
        let player = Player {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&player).unwrap();
        assert!(!json.contains("alice@example.com"));
        assert!(json.contains("\"username\":\"alice\""));
    }

    #[test]
    fn test_leaderboard_type_key() {
        assert_eq!(
            Leaderboard::type_key(LeaderboardSite::Lichess, "monthly", "swiss", "blitz"),
            "LEADERBOARD_MONTHLY_SWISS_BLITZ"
        );
        assert_eq!(
            Leaderboard::type_key(LeaderboardSite::Chesscom, "yearly", "grand_prix", "rapid"),
            "LEADERBOARD_CHESSCOM_YEARLY_GRAND_PRIX_RAPID"
        );
    }

    #[test]
    fn test_leaderboard_site_parse() {
        assert_eq!(LeaderboardSite::parse("chess.com"), LeaderboardSite::Chesscom);
        assert_eq!(LeaderboardSite::parse("lichess.org"), LeaderboardSite::Lichess);
        assert_eq!(LeaderboardSite::parse(""), LeaderboardSite::Lichess);
    }
}
