//! # Open Classical
//!
//! A state engine for the Open Classical, a multi-round Swiss chess
//! tournament played at long time controls across regional rating
//! sections.
//!
//! Editions, sections, rounds and pairings are created by registration
//! and pairing tooling outside this crate. This library owns what happens
//! afterwards: directors moderate players and verify reported results,
//! participants self-report games into an append-only ledger, and the
//! public surface serves editions, history and leaderboards.
//!
//! ## Architecture
//!
//! State mutations never rewrite a whole edition. Every write targets
//! exactly one player record or one `(round, pairing)` slot, guarded by
//! composite keys, so two directors working in the same section cannot
//! lose each other's changes. Managers receive their store, authorization
//! gate and notifier as shared trait objects, which keeps every operation
//! testable against in-memory mocks.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Data models, moderation, queries and CSV export
//! - [`ledger`]: Self-reported results and the append-only report ledger
//! - [`db`]: PostgreSQL pool, migrations and the tournament store
//! - [`auth`]: Bearer token verification and role flag lookups
//! - [`notify`]: Best-effort notification hooks after verification
//!
//! ## Example
//!
//! ```
//! use open_classical::tournament::EditionKey;
//!
//! // An empty or sentinel key addresses the in-progress edition.
//! let key = EditionKey::parse("");
//! assert_eq!(key, EditionKey::Current);
//!
//! let dated = EditionKey::parse("2025-06-03");
//! assert_eq!(dated.as_str(), "2025-06-03");
//! ```

/// Bearer token verification and role flag lookups.
pub mod auth;
pub use auth::{AuthManager, Caller, RoleFlags};

/// Database connection management and the tournament store.
pub mod db;
pub use db::{Database, DatabaseConfig, PgTournamentStore, TournamentStore};

/// Self-reported results and the append-only report ledger.
pub mod ledger;
pub use ledger::{ResultsLedger, SubmitManager, SubmitResultRequest};

/// Post-mutation notification hooks.
pub mod notify;
pub use notify::{LogNotifier, ModerationNotifier};

/// Tournament state, moderation, queries and export.
pub mod tournament;
pub use tournament::{
    Edition, EditionKey, ModerationManager, QueryManager, TournamentError, TournamentResult,
    VerifyResultRequest,
};
