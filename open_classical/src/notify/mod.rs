//! Post-mutation notification hooks.
//!
//! Verified results fan out to a notifier so directors can mirror them
//! to chat channels. Delivery is best-effort: a failed send is logged
//! and never turns a committed mutation into an operation failure.

use async_trait::async_trait;
use thiserror::Error;

use crate::tournament::models::PairingUpdate;

/// Notification errors
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification could not be delivered
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Result type for notification operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Trait for post-mutation notification fan-out
#[async_trait]
pub trait ModerationNotifier: Send + Sync {
    /// Called after a pairing result has been verified and persisted
    async fn result_verified(&self, update: &PairingUpdate) -> NotifyResult<()>;
}

/// Notifier that only writes to the application log
///
/// Used as the default wiring; deployments with a chat integration swap
/// in their own implementation.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl ModerationNotifier for LogNotifier {
    async fn result_verified(&self, update: &PairingUpdate) -> NotifyResult<()> {
        log::info!(
            "Verified result {} for {} vs {} in {}_{} round {}",
            update.pairing.result,
            update.pairing.white.lichess_username,
            update.pairing.black.lichess_username,
            update.region,
            update.section,
            update.round_index + 1
        );
        Ok(())
    }
}

/// Mock implementations for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    /// Notifier that counts deliveries
    #[derive(Clone, Default)]
    pub struct CountingNotifier {
        delivered: Arc<AtomicUsize>,
    }

    impl CountingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn delivered(&self) -> usize {
            self.delivered.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModerationNotifier for CountingNotifier {
        async fn result_verified(&self, _update: &PairingUpdate) -> NotifyResult<()> {
            self.delivered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Notifier that always fails delivery
    #[derive(Clone, Default)]
    pub struct FailingNotifier;

    #[async_trait]
    impl ModerationNotifier for FailingNotifier {
        async fn result_verified(&self, _update: &PairingUpdate) -> NotifyResult<()> {
            Err(NotifyError::Delivery("webhook unreachable".to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::tournament::models::Pairing;

        fn update() -> PairingUpdate {
            PairingUpdate {
                region: "A".to_string(),
                section: "Open".to_string(),
                round_index: 0,
                pairing_index: 0,
                overwrite_verified: true,
                pairing: Pairing::default(),
            }
        }

        #[tokio::test]
        async fn test_counting_notifier_counts() {
            let notifier = CountingNotifier::new();
            notifier.result_verified(&update()).await.unwrap();
            notifier.result_verified(&update()).await.unwrap();
            assert_eq!(notifier.delivered(), 2);
        }

        #[tokio::test]
        async fn test_failing_notifier_fails() {
            let notifier = FailingNotifier;
            assert!(notifier.result_verified(&update()).await.is_err());
        }

        #[tokio::test]
        async fn test_log_notifier_succeeds() {
            let notifier = LogNotifier;
            assert!(notifier.result_verified(&update()).await.is_ok());
        }
    }
}
