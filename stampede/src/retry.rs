//! Bounded fixed-delay retry for the setup handshake.
use stampede_core::RetryPolicy;
use std::future::Future;
use tokio::time::sleep;
#[allow(unused_imports)]
use tracing::{debug, warn};

/// The attempt budget was spent without a success.
#[derive(Debug, thiserror::Error)]
#[error("failed after {attempts} attempts: {last}")]
pub struct RetryError<E>
where
    E: std::error::Error + 'static,
{
    pub attempts: u32,
    #[source]
    pub last: E,
}

/// Run `op` until it succeeds or the policy's attempt budget is spent,
/// sleeping `policy.delay` between attempts (never after the last one).
///
/// Every `Err` consumes an attempt. Callers map non-success statuses into
/// their error type, so slow failures and fast failures retry uniformly.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + 'static,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts => {
                warn!(
                    "Attempt {attempt}/{max_attempts} failed: {err}. Retrying in {:?}",
                    policy.delay
                );
                sleep(policy.delay).await;
            }
            Err(err) => {
                return Err(RetryError {
                    attempts: attempt,
                    last: err,
                })
            }
        }
    }
}
