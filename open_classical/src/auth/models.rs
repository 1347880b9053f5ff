//! Authentication data models.
//!
//! Accounts live in an external identity provider; this service only
//! verifies the bearer tokens it issues and looks up the role flags
//! kept alongside the tournament data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: Uuid, // Identity provider subject
    pub username: String,
    pub email: Option<String>,
    pub exp: i64, // Expiration timestamp
    pub iat: i64, // Issued at timestamp
}

/// Identity of the caller of an operation, resolved from token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Account username of the caller
    pub username: String,
    /// Email of the caller, if the token carried one
    pub email: Option<String>,
}

impl Caller {
    /// Resolve the caller identity from verified token claims
    pub fn from_claims(claims: &AccessTokenClaims) -> Self {
        Self {
            username: claims.username.clone(),
            email: claims.email.clone(),
        }
    }
}

/// Role flags controlling access to moderation operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFlags {
    /// Site-wide administrator
    pub is_admin: bool,
    /// Tournament director for the Open Classical
    pub is_tournament_admin: bool,
}

impl RoleFlags {
    /// Whether the holder may run moderation operations
    pub fn can_moderate(&self) -> bool {
        self.is_admin || self.is_tournament_admin
    }
}
