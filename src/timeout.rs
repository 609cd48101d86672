//! Deadline racing for SDK-bound operations.
//!
//! The SDK's calls are blocking and have no deadline of their own; use
//! cases hop them onto the blocking pool and race the result against the
//! configured timeout, treating expiry as an ordinary failure.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// An operation outlived its deadline.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("operation timed out after {0:?}")]
pub struct TimeoutExpired(pub Duration);

/// Race `operation` against `limit`.
pub async fn run_with_timeout<F>(limit: Duration, operation: F) -> Result<F::Output, TimeoutExpired>
where
    F: Future,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| TimeoutExpired(limit))
}

/// Run a blocking closure on the blocking pool, racing it against `limit`.
///
/// On expiry the closure keeps running to completion on its pool thread;
/// only the result is abandoned.
pub async fn run_blocking_with_timeout<T, F>(limit: Duration, operation: F) -> Result<T, TimeoutExpired>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(operation);
    match run_with_timeout(limit, handle).await {
        Ok(joined) => Ok(joined.expect("blocking operation panicked")),
        Err(expired) => Err(expired),
    }
}
