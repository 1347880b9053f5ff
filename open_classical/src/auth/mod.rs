//! Authentication module for token verification and role checks.
//!
//! Accounts and tokens are owned by an external identity provider; this
//! module implements the two things the tournament engine needs from it:
//! - Verifying bearer tokens and resolving the caller identity
//! - Looking up the role flags that gate moderation operations
//!
//! ## Example
//!
//! ```no_run
//! use open_classical::auth::AuthManager;
//!
//! fn main() {
//!     let auth = AuthManager::new("jwt-secret".to_string());
//!     match auth.verify_access_token("some-token") {
//!         Ok(claims) => println!("caller: {}", claims.username),
//!         Err(err) => eprintln!("rejected: {err}"),
//!     }
//! }
//! ```

pub mod errors;
pub mod gate;
pub mod manager;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use gate::{AuthorizationGate, PgAuthorizationGate};
pub use manager::AuthManager;
pub use models::{AccessTokenClaims, Caller, RoleFlags};
