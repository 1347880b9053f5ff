//! Tournament error types.

use thiserror::Error;

use crate::auth::errors::AuthError;
use crate::ledger::errors::LedgerError;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Missing or malformed request field
    #[error("{0}")]
    Validation(String),

    /// Caller has no resolvable identity
    #[error("{0}")]
    Unauthenticated(String),

    /// Caller is authenticated but lacks the required role
    #[error("{0}")]
    Forbidden(String),

    /// Edition, section, player or pairing does not exist
    #[error("{0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored document could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authorization lookup failed
    #[error("Authorization error: {0}")]
    Auth(#[from] AuthError),

    /// Result ledger append failed
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl TournamentError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database, serialization and downstream service errors are sanitized to
    /// prevent information disclosure about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_)
            | TournamentError::Serialization(_)
            | TournamentError::Auth(_)
            | TournamentError::Ledger(_) => "Temporary server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
