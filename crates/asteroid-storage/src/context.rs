//! Deadline and cancellation for store-bound operations.

use crate::errors::RepositoryError;
use std::{future::Future, time::Duration};
use tokio_util::sync::CancellationToken;

/// Default bound on a single repository operation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Caller-supplied limits for a repository operation
///
/// Cloning shares the cancellation token, so canceling any clone cancels
/// every operation running under it.
#[derive(Debug, Clone)]
pub struct OpContext {
    timeout: Duration,
    cancel: CancellationToken,
}

impl Default for OpContext {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl OpContext {
    pub fn new(timeout: Duration) -> Self {
        Self::with_cancellation(timeout, CancellationToken::new())
    }

    pub fn with_cancellation(timeout: Duration, cancel: CancellationToken) -> Self {
        Self { timeout, cancel }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `operation` to completion unless the deadline passes or the
    /// token is canceled first. Cancellation wins ties.
    pub async fn run<F, T>(
        &self,
        op: &'static str,
        key: &str,
        operation: F,
    ) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RepositoryError::Canceled {
                op,
                key: key.to_string(),
            }),
            outcome = tokio::time::timeout(self.timeout, operation) => match outcome {
                Ok(result) => result,
                Err(_) => Err(RepositoryError::Timeout {
                    op,
                    key: key.to_string(),
                    timeout: self.timeout,
                }),
            },
        }
    }
}
