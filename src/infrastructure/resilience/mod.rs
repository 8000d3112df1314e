//! Fault tolerance for calls to unreliable upstreams.
//!
//! - [`RetryPolicy`] - exponential backoff with optional jitter
//! - [`CircuitBreaker`] - Closed / Open / HalfOpen guard with metrics
//! - [`ResilienceExecutor`] - runs an async operation under both

mod circuit_breaker;
mod executor;
mod retry_policy;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitSnapshot, CircuitState};
pub use executor::{ExecuteError, ResilienceExecutor, Retryable};
pub use retry_policy::RetryPolicy;
