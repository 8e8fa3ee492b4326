//! Retry with exponential back-off and jitter for catalog fetches.
//!
//! Transient failures (network errors, 429, 5xx) are retried; everything
//! else is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Returns `true` for errors worth retrying after a back-off delay.
///
/// **Retriable:** network-level failures, [`CatalogError::RateLimited`], and
/// [`CatalogError::UnexpectedStatus`] with a 5xx status.
///
/// **Not retriable:** [`CatalogError::NotFound`], other statuses, and
/// deserialization failures; retrying returns the same result.
pub(crate) fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        CatalogError::RateLimited { .. } => true,
        CatalogError::UnexpectedStatus { status, .. } => *status >= 500,
        CatalogError::NotFound { .. }
        | CatalogError::Io { .. }
        | CatalogError::Deserialize { .. }
        | CatalogError::Yaml { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// The wait before the n-th retry is `backoff_base_ms * 2^(n-1)` with ±25 %
/// jitter, capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
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
                    "transient catalog fetch error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
