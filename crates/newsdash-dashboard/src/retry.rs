//! Retry with exponential back-off and jitter for idempotent reads.
//!
//! Only reads go through [`retry_with_backoff`]; triggering an analysis is
//! never retried because every call creates a new snapshot.

use std::future::Future;
use std::time::Duration;

use newsdash_core::ErrorKind;

use crate::error::ApiError;

/// Transport failures, timeouts and 5xx answers are worth another try.
/// Authorization, validation and decode failures are not.
pub(crate) fn is_retriable(err: &ApiError) -> bool {
    match err.kind {
        ErrorKind::ServiceUnavailable => true,
        ErrorKind::BackendFailure => err.status.is_some_and(|s| s >= 500),
        ErrorKind::AuthMismatch
        | ErrorKind::InternalError
        | ErrorKind::ValidationError
        | ErrorKind::Unauthenticated => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// retriable errors.
///
/// The delay before attempt `n + 1` is `backoff_base_ms · 2^(n-1)` with
/// ±25 % jitter, capped at 10 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    const MAX_DELAY_MS: u64 = 10_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "dashboard read failed; retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
