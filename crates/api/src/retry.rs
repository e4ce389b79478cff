//! Bounded retry for idempotent store reads.
//!
//! Only reads and the eligibility lookup go through here. State-changing
//! transitions (reserve, confirm, cancel, expire) are never retried.

use std::future::Future;
use std::time::Duration;

/// Default number of attempts, including the first.
pub const DEFAULT_STORE_RETRY_ATTEMPTS: u32 = 3;

/// Delay before retry `n` is `n * RETRY_BACKOFF_STEP`.
const RETRY_BACKOFF_STEP: Duration = Duration::from_millis(100);

/// Whether a sqlx error is a connection-level failure worth retrying.
///
/// Query errors (constraint violations, bad SQL, decode failures) are not.
pub fn is_transient(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}

/// Run `op` up to `attempts` times while it fails with a transient error.
///
/// Non-transient errors return immediately. The last transient error is
/// returned once attempts are exhausted.
pub async fn with_store_retry<T, F, Fut>(attempts: u32, mut op: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts && is_transient(&err) => {
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    error = %err,
                    "Transient store error, retrying"
                );
                tokio::time::sleep(RETRY_BACKOFF_STEP * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
