use std::fmt::Display;
use std::future::Future;

use super::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitSnapshot};
use super::retry_policy::RetryPolicy;

/// Failure classification consulted between attempts.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Error returned by [`ResilienceExecutor::execute`].
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError<E> {
    /// The breaker rejected the call; the operation was not invoked.
    #[error("Circuit breaker is OPEN - service temporarily unavailable")]
    CircuitOpen,

    #[error(transparent)]
    Operation(E),
}

impl<E> ExecuteError<E> {
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen)
    }
}

/// Retry-with-backoff wrapped in a circuit breaker.
///
/// Knows nothing about the operation it runs beyond its [`Retryable`] error.
/// Each executor owns its breaker; independent upstreams need independent executors.
#[derive(Debug)]
pub struct ResilienceExecutor {
    policy: RetryPolicy,
    breaker: CircuitBreaker,
}

impl ResilienceExecutor {
    pub fn new(
        name: impl Into<String>,
        policy: RetryPolicy,
        breaker_config: CircuitBreakerConfig,
    ) -> Self {
        Self {
            policy,
            breaker: CircuitBreaker::new(name, breaker_config),
        }
    }

    /// Runs `operation` under the breaker, retrying retriable failures.
    ///
    /// # Behavior
    ///
    /// 1. An open breaker within its recovery window fails fast with
    ///    [`ExecuteError::CircuitOpen`] without invoking `operation`
    /// 2. Up to `max_attempts` attempts; success closes the breaker and clears failures
    /// 3. A non-retriable error is recorded and returned immediately
    /// 4. Retriable errors sleep for the policy delay before the next attempt
    /// 5. When attempts run out, the failure is recorded and the last error returned
    ///
    /// # Errors
    ///
    /// [`ExecuteError::CircuitOpen`] or the operation's last error.
    pub async fn execute<T, E, F, Fut>(
        &self,
        mut operation: F,
        context: &str,
    ) -> Result<T, ExecuteError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        if !self.breaker.try_acquire() {
            tracing::warn!(
                context,
                state = %self.breaker.state(),
                "Call rejected by circuit breaker"
            );
            return Err(ExecuteError::CircuitOpen);
        }

        let max_attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            tracing::debug!(context, attempt, max_attempts, "Executing operation");

            let error = match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(context, attempt, "Operation succeeded after retry");
                    }
                    self.breaker.record_success();
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !error.is_retryable() {
                tracing::warn!(context, attempt, error = %error, "Non-retryable failure");
                self.breaker.record_failure();
                return Err(ExecuteError::Operation(error));
            }

            if attempt >= max_attempts {
                tracing::error!(
                    context,
                    attempt,
                    max_attempts,
                    error = %error,
                    "All attempts failed"
                );
                self.breaker.record_failure();
                return Err(ExecuteError::Operation(error));
            }

            let delay = self.policy.delay_for(attempt);
            tracing::warn!(
                context,
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    pub fn circuit_snapshot(&self) -> CircuitSnapshot {
        self.breaker.snapshot()
    }

    pub fn reset_circuit(&self) {
        self.breaker.reset();
    }
}
