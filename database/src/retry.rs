use std::{future::Future, pin::Pin, time::Duration};

use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(250),
        }
    }
}

pub type RetryFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Runs `operation` until it succeeds or `policy.max_retries` extra attempts
/// have failed, doubling the pause after each failure. The last error is
/// returned as is.
pub async fn retry_with_backoff<F, T, E>(policy: RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> RetryFuture<T, E>,
    E: std::fmt::Display,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt <= policy.max_retries => {
                tracing::warn!("Attempt {attempt} failed: {e}. Retrying in {delay:?}...");
                sleep(delay).await;
                delay *= 2;
            }
            Err(e) => {
                tracing::warn!("Giving up after {attempt} attempts: {e}");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn counting(
        calls: Arc<AtomicUsize>,
        succeed_on: usize,
    ) -> impl FnMut() -> RetryFuture<usize, String> {
        move || -> RetryFuture<usize, String> {
            let calls = calls.clone();
            Box::pin(async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= succeed_on {
                    Ok(n)
                } else {
                    Err(format!("attempt {n} failed"))
                }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let result = retry_with_backoff(RetryPolicy::default(), counting(calls.clone(), 3)).await;
        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_with_last_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = RetryPolicy {
            max_retries: 2,
            initial_delay: Duration::from_millis(10),
        };
        let result = retry_with_backoff(policy, counting(calls.clone(), 100)).await;
        assert_eq!(result, Err("attempt 3 failed".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
