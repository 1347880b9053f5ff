//! Result ledger module for self-reported game results.
//!
//! Participants report their own results into an append-only ledger
//! that tournament directors review by hand. Reports never mutate
//! tournament state directly; a director promotes a reviewed report by
//! verifying the pairing, so a mistaken or malicious self-report cannot
//! corrupt verified standings.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use open_classical::db::{Database, DatabaseConfig};
//! use open_classical::ledger::{PgResultsLedger, SubmitManager, SubmitResultRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::default()).await?;
//!     let submit = SubmitManager::new(Arc::new(PgResultsLedger::new(db.pool().clone())));
//!
//!     let request = SubmitResultRequest {
//!         email: "player@example.com".to_string(),
//!         section: "A_Open".to_string(),
//!         round: 1,
//!         white: "alice".to_string(),
//!         black: "bob".to_string(),
//!         result: "1/2-1/2".to_string(),
//!         ..Default::default()
//!     };
//!     let report = submit.submit_result(None, request).await?;
//!     println!("Recorded report for round {}", report.round);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{LedgerError, LedgerResult};
pub use manager::{PgResultsLedger, ResultsLedger, SubmitManager};
pub use models::{ResultReport, SubmitResultRequest};
