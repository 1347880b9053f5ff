//! Result ingestion manager and ledger implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::auth::models::Caller;
use crate::tournament::errors::{TournamentError, TournamentResult};

use super::{
    errors::LedgerResult,
    models::{ResultReport, SubmitResultRequest},
};

/// Trait for the append-only result ledger
#[async_trait]
pub trait ResultsLedger: Send + Sync {
    /// Append one report to the ledger
    async fn append(&self, report: &ResultReport) -> LedgerResult<()>;
}

/// Default PostgreSQL implementation of `ResultsLedger`
pub struct PgResultsLedger {
    pool: PgPool,
}

impl PgResultsLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultsLedger for PgResultsLedger {
    async fn append(&self, report: &ResultReport) -> LedgerResult<()> {
        sqlx::query(
            "INSERT INTO result_reports
             (submitted_at, email, section, round, game_url, white, black, result,
              report_opponent, notes, verified)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(report.submitted_at)
        .bind(&report.email)
        .bind(&report.section)
        .bind(report.round)
        .bind(&report.game_url)
        .bind(&report.white)
        .bind(&report.black)
        .bind(&report.result)
        .bind(report.report_opponent)
        .bind(&report.notes)
        .bind(report.verified)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Result ingestion manager
///
/// Accepts self-reported results and forwards them to the ledger. The
/// manager never touches tournament state; promotion into a verified
/// pairing happens separately through result verification.
#[derive(Clone)]
pub struct SubmitManager {
    ledger: Arc<dyn ResultsLedger>,
}

impl SubmitManager {
    /// Create a new submission manager
    pub fn new(ledger: Arc<dyn ResultsLedger>) -> Self {
        Self { ledger }
    }

    /// Accept a self-reported result and append it to the ledger
    ///
    /// # Arguments
    ///
    /// * `caller` - Resolved identity for signed-in submitters, if any
    /// * `request` - The self-reported result
    ///
    /// # Returns
    ///
    /// * `TournamentResult<ResultReport>` - The appended record or error
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - A required field is missing
    /// * `TournamentError::Ledger` - The ledger append failed
    pub async fn submit_result(
        &self,
        caller: Option<&Caller>,
        request: SubmitResultRequest,
    ) -> TournamentResult<ResultReport> {
        let mut email = request.email.trim().to_string();
        if email.is_empty() {
            if let Some(caller_email) = caller.and_then(|c| c.email.as_deref()) {
                email = caller_email.trim().to_string();
            }
        }

        if email.is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: email is required".to_string(),
            ));
        }
        if request.section.trim().is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: section is required".to_string(),
            ));
        }
        if request.round == 0 {
            return Err(TournamentError::Validation(
                "Invalid request: round is required".to_string(),
            ));
        }
        if request.white.trim().is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: white is required".to_string(),
            ));
        }
        if request.black.trim().is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: black is required".to_string(),
            ));
        }
        if request.result.trim().is_empty() {
            return Err(TournamentError::Validation(
                "Invalid request: result is required".to_string(),
            ));
        }

        let report = ResultReport {
            submitted_at: Utc::now(),
            email,
            section: request.section.trim().to_string(),
            round: request.round as i32,
            game_url: request.game_url.trim().to_string(),
            white: request.white.trim().to_string(),
            black: request.black.trim().to_string(),
            result: request.result.trim().to_string(),
            report_opponent: request.report_opponent,
            notes: request.notes.trim().to_string(),
            verified: false,
        };

        self.ledger.append(&report).await?;
        log::info!(
            "Recorded result report for {} vs {} in {} round {}",
            report.white,
            report.black,
            report.section,
            report.round
        );
        Ok(report)
    }
}

/// Mock implementations for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use crate::ledger::errors::LedgerError;

    /// Ledger backed by an in-memory list
    #[derive(Default)]
    pub struct MemoryLedger {
        reports: Arc<Mutex<Vec<ResultReport>>>,
    }

    impl MemoryLedger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reports(&self) -> Vec<ResultReport> {
            self.reports.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResultsLedger for MemoryLedger {
        async fn append(&self, report: &ResultReport) -> LedgerResult<()> {
            self.reports.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    /// Ledger whose appends always fail
    #[derive(Default)]
    pub struct FailingLedger;

    #[async_trait]
    impl ResultsLedger for FailingLedger {
        async fn append(&self, _report: &ResultReport) -> LedgerResult<()> {
            Err(LedgerError::Database(sqlx::Error::PoolClosed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{FailingLedger, MemoryLedger};
    use super::*;

    fn valid_request() -> SubmitResultRequest {
        SubmitResultRequest {
            email: "alice@example.com".to_string(),
            section: "A_Open".to_string(),
            round: 2,
            game_url: "https://lichess.org/abcd1234".to_string(),
            white: "alice".to_string(),
            black: "bob".to_string(),
            result: "1-0".to_string(),
            report_opponent: false,
            notes: "".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_result_appends_to_ledger() {
        let ledger = Arc::new(MemoryLedger::new());
        let manager = SubmitManager::new(ledger.clone());

        let report = manager.submit_result(None, valid_request()).await.unwrap();
        assert_eq!(report.round, 2);
        assert!(!report.verified);

        let stored = ledger.reports();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].white, "alice");
        assert_eq!(stored[0].result, "1-0");
    }

    #[tokio::test]
    async fn test_submit_result_trims_whitespace() {
        let ledger = Arc::new(MemoryLedger::new());
        let manager = SubmitManager::new(ledger.clone());

        let mut request = valid_request();
        request.white = "  alice  ".to_string();
        request.notes = " late game \n".to_string();
        manager.submit_result(None, request).await.unwrap();

        let stored = ledger.reports();
        assert_eq!(stored[0].white, "alice");
        assert_eq!(stored[0].notes, "late game");
    }

    #[tokio::test]
    async fn test_submit_result_requires_each_field() {
        let manager = SubmitManager::new(Arc::new(MemoryLedger::new()));

        let cases = [
            ("email", SubmitResultRequest {
                email: " ".to_string(),
                ..valid_request()
            }),
            ("section", SubmitResultRequest {
                section: "".to_string(),
                ..valid_request()
            }),
            ("round", SubmitResultRequest {
                round: 0,
                ..valid_request()
            }),
            ("white", SubmitResultRequest {
                white: "".to_string(),
                ..valid_request()
            }),
            ("black", SubmitResultRequest {
                black: "  ".to_string(),
                ..valid_request()
            }),
            ("result", SubmitResultRequest {
                result: "".to_string(),
                ..valid_request()
            }),
        ];

        for (field, request) in cases {
            let err = manager.submit_result(None, request).await.unwrap_err();
            match err {
                TournamentError::Validation(message) => {
                    assert_eq!(message, format!("Invalid request: {field} is required"));
                }
                other => panic!("expected validation error for {field}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_submit_result_falls_back_to_caller_email() {
        let ledger = Arc::new(MemoryLedger::new());
        let manager = SubmitManager::new(ledger.clone());

        let caller = Caller {
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
        };
        let mut request = valid_request();
        request.email = "".to_string();

        manager.submit_result(Some(&caller), request).await.unwrap();
        assert_eq!(ledger.reports()[0].email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_submit_result_keeps_explicit_email() {
        let ledger = Arc::new(MemoryLedger::new());
        let manager = SubmitManager::new(ledger.clone());

        let caller = Caller {
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
        };
        manager
            .submit_result(Some(&caller), valid_request())
            .await
            .unwrap();
        assert_eq!(ledger.reports()[0].email, "alice@example.com");

        let mut request = valid_request();
        request.email = "other@example.com".to_string();
        manager.submit_result(Some(&caller), request).await.unwrap();
        assert_eq!(ledger.reports()[1].email, "other@example.com");
    }

    #[tokio::test]
    async fn test_submit_result_anonymous_without_email_fails() {
        let manager = SubmitManager::new(Arc::new(MemoryLedger::new()));

        let mut request = valid_request();
        request.email = "".to_string();
        let err = manager.submit_result(None, request).await.unwrap_err();
        assert!(matches!(err, TournamentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_submit_result_ledger_failure_is_sanitized() {
        let manager = SubmitManager::new(Arc::new(FailingLedger));

        let err = manager.submit_result(None, valid_request()).await.unwrap_err();
        assert!(matches!(err, TournamentError::Ledger(_)));
        assert_eq!(err.client_message(), "Temporary server error");
    }
}
