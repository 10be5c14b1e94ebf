//! Retry with exponential backoff and jitter for page fetches.
//!
//! Storefronts behind shared hosting regularly answer with 429 or a
//! transient 5xx under load; those are retried. Anything that would fail the
//! same way again (404, non-HTML body, bad URL) is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on any single backoff sleep.
const MAX_DELAY_SECS: u64 = 60;

/// Returns `true` if `err` is worth retrying after a backoff delay.
///
/// Retriable:
/// - [`ScraperError::RateLimited`]: HTTP 429.
/// - [`ScraperError::Http`]: timeouts and connection failures.
/// - [`ScraperError::UnexpectedStatus`] with a 5xx status.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } => true,
        ScraperError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        ScraperError::NotFound { .. }
        | ScraperError::NotHtml { .. }
        | ScraperError::InvalidUrl { .. }
        | ScraperError::MissingField { .. } => false,
    }
}

/// Executes `operation`, retrying transient failures up to `max_retries`
/// additional times.
///
/// The n-th retry waits `backoff_base_secs * 2^(n-1)` seconds scaled by a
/// random factor in `[0.75, 1.25)`, capped at one minute. A 429 that names a
/// longer `Retry-After` is honored up to the same cap.
///
/// With `max_retries = 3` the operation runs at most 4 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }
        attempt += 1;

        let delay = backoff_delay(backoff_base_secs, attempt, &err);
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
    }
}

fn backoff_delay(backoff_base_secs: u64, attempt: u32, err: &ScraperError) -> Duration {
    let computed = backoff_base_secs
        .saturating_mul(1u64 << (attempt - 1).min(10))
        .min(MAX_DELAY_SECS);

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered_ms = (computed as f64 * 1000.0 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;

    let floor_ms = match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } if backoff_base_secs > 0 => (*retry_after_secs).min(MAX_DELAY_SECS) * 1000,
        _ => 0,
    };

    Duration::from_millis(jittered_ms.max(floor_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited(retry_after_secs: u64) -> ScraperError {
        ScraperError::RateLimited {
            domain: "shop.example.com".to_owned(),
            retry_after_secs,
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ScraperError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limit_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(rate_limited(30))
                } else {
                    Ok::<u32, ScraperError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&calls);
        let result = retry_with_backoff(1, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScraperError>(ScraperError::UnexpectedStatus {
                    status: 503,
                    url: "https://shop.example.com/p/1".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(
            result,
            Err(ScraperError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let calls = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScraperError>(ScraperError::NotFound {
                    url: "https://shop.example.com/p/missing".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ScraperError::NotFound { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&calls);
        let _ = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScraperError>(ScraperError::UnexpectedStatus {
                    status: 403,
                    url: "https://shop.example.com/p/1".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn backoff_delay_honors_retry_after_and_cap() {
        let delay = backoff_delay(1, 1, &rate_limited(5));
        assert!(delay >= Duration::from_secs(5));

        let capped = backoff_delay(1, 1, &rate_limited(3600));
        assert_eq!(capped, Duration::from_secs(MAX_DELAY_SECS));
    }

    #[test]
    fn backoff_delay_is_zero_without_base() {
        assert_eq!(backoff_delay(0, 3, &rate_limited(30)), Duration::ZERO);
    }
}
