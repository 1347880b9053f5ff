//! Tournament module for the Open Classical.
//!
//! This module provides the state engine for a multi-round Swiss
//! tournament played at long time controls, including:
//! - Edition, section, round and pairing data models
//! - Director moderation: banning, withdrawing and reinstating players
//! - Result verification with targeted pairing updates
//! - Registration CSV export
//! - Read-only edition and leaderboard queries
//!
//! ## Example
//!
//! ```no_run
//! use open_classical::auth::gate::PgAuthorizationGate;
//! use open_classical::db::{Database, PgTournamentStore};
//! use open_classical::notify::LogNotifier;
//! use open_classical::tournament::{ModerationManager, QueryManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let store = Arc::new(PgTournamentStore::new(db.pool().clone()));
//!     let gate = Arc::new(PgAuthorizationGate::new(db.pool().clone()));
//!
//!     let moderation = ModerationManager::new(store.clone(), gate, Arc::new(LogNotifier));
//!     let queries = QueryManager::new(store);
//!
//!     let edition = queries.get_edition("").await?;
//!     println!("Current edition has {} sections", edition.sections.len());
//!
//!     let caller = open_classical::auth::Caller {
//!         username: "td".to_string(),
//!         email: None,
//!     };
//!     moderation.ban_player(&caller, "A", "Open", "cheater123").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod export;
pub mod models;
pub mod moderation;
pub mod queries;

pub use errors::{TournamentError, TournamentResult};
pub use export::registrations_csv;
pub use models::{
    Edition, EditionKey, EditionPage, EditionSummary, Leaderboard, LeaderboardPlayer,
    LeaderboardSite, Pairing, PairingUpdate, Player, PlayerStatus, PlayerSummary, Round, Section,
};
pub use moderation::{ModerationManager, VerifyResultRequest};
pub use queries::QueryManager;
