//! Authorization gate for moderation operations.
//!
//! Role flags live in an external user profile store; the gate is the
//! trait seam that lets managers check them without caring where they
//! come from, and lets tests inject canned roles.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::errors::AuthResult;
use super::models::RoleFlags;

/// Trait for authorization lookups
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    /// Role flags for the given account username
    ///
    /// Unknown usernames resolve to all-false flags rather than an error;
    /// absence of a profile row simply means no privileges.
    async fn check(&self, username: &str) -> AuthResult<RoleFlags>;
}

/// Default PostgreSQL implementation of `AuthorizationGate`
pub struct PgAuthorizationGate {
    pool: PgPool,
}

impl PgAuthorizationGate {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationGate for PgAuthorizationGate {
    async fn check(&self, username: &str) -> AuthResult<RoleFlags> {
        let row = sqlx::query(
            "SELECT is_admin, is_tournament_admin FROM user_roles WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(|r| RoleFlags {
                is_admin: r.get("is_admin"),
                is_tournament_admin: r.get("is_tournament_admin"),
            })
            .unwrap_or_default())
    }
}
