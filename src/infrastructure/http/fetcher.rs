use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use super::error::FetchError;
use super::transport::{HttpTransport, ReqwestTransport};
use crate::infrastructure::resilience::{
    CircuitBreakerConfig, CircuitSnapshot, ExecuteError, ResilienceExecutor, RetryPolicy,
};

const BREAKER_NAME: &str = "html_fetcher";

/// Settings for [`HtmlFetcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetcherOptions {
    /// Per-attempt request timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub circuit: CircuitBreakerConfig,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(30_000),
            retry: RetryPolicy {
                max_delay: Duration::from_millis(10_000),
                ..RetryPolicy::default()
            },
            circuit: CircuitBreakerConfig::default(),
        }
    }
}

/// Downloads pages through a [`ResilienceExecutor`].
///
/// The fetcher owns its executor, so the circuit breaker state is shared by
/// every fetch made through the same instance.
pub struct HtmlFetcher {
    transport: Arc<dyn HttpTransport>,
    executor: ResilienceExecutor,
}

impl HtmlFetcher {
    /// Creates a fetcher backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(options: FetcherOptions) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(options.timeout)?);
        Ok(Self::with_transport(transport, options))
    }

    /// Creates a fetcher over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, options: FetcherOptions) -> Self {
        tracing::info!(
            timeout_ms = options.timeout.as_millis() as u64,
            max_attempts = options.retry.attempts(),
            failure_threshold = options.circuit.failure_threshold,
            "HtmlFetcher initialized"
        );

        Self {
            transport,
            executor: ResilienceExecutor::new(BREAKER_NAME, options.retry, options.circuit),
        }
    }

    /// Fetches the body of `url` with retries and circuit breaking.
    ///
    /// # Errors
    ///
    /// [`ExecuteError::CircuitOpen`] when the breaker rejects the call, otherwise
    /// the last [`FetchError`].
    pub async fn fetch(&self, url: &str) -> Result<String, ExecuteError<FetchError>> {
        self.executor.execute(|| self.transport.get(url), url).await
    }

    /// Best-effort probe: one full [`HtmlFetcher::fetch`], any error reported as `false`.
    pub async fn is_source_available(&self, url: &str) -> bool {
        match self.fetch(url).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(url, error = %e, "Source unavailable");
                false
            }
        }
    }

    pub fn circuit_snapshot(&self) -> CircuitSnapshot {
        self.executor.circuit_snapshot()
    }

    pub fn reset_circuit(&self) {
        self.executor.reset_circuit();
    }
}
