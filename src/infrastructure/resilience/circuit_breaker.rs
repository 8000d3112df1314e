use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use serde::Serialize;
use tokio::time::Instant;

/// Circuit breaker thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Recorded failures that open the circuit.
    pub failure_threshold: u32,
    /// How long an open circuit rejects calls before allowing a probe.
    pub recovery_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_millis(60_000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::Open => "OPEN",
            Self::HalfOpen => "HALF_OPEN",
        }
    }

    fn metric_value(self) -> f64 {
        match self {
            Self::Closed => 0.0,
            Self::Open => 1.0,
            Self::HalfOpen => 2.0,
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a breaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitSnapshot {
    pub state: CircuitState,
    pub failures: u32,
    pub failure_threshold: u32,
    pub recovery_timeout_ms: u64,
    pub last_failure_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    failures: u32,
    last_failure: Option<Instant>,
    last_failure_at: Option<DateTime<Utc>>,
    probe_started: Option<Instant>,
}

impl BreakerState {
    fn closed() -> Self {
        Self {
            state: CircuitState::Closed,
            failures: 0,
            last_failure: None,
            last_failure_at: None,
            probe_started: None,
        }
    }
}

/// Closed / Open / HalfOpen state machine guarding one upstream.
///
/// State lives behind a mutex so interleaved calls never corrupt the counters.
/// The lock is never held across an `.await`.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        let breaker = Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerState::closed()),
        };
        breaker.update_state_metric(CircuitState::Closed);
        breaker
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Asks for permission to call the upstream.
    ///
    /// An open circuit rejects until `recovery_timeout` has passed since the last
    /// failure, then moves to `HalfOpen` and lets exactly one probe through. Further
    /// calls are rejected while that probe is in flight.
    pub fn try_acquire(&self) -> bool {
        let mut inner = self.lock();
        let recovery = self.config.recovery_timeout;

        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let cooling = inner
                    .last_failure
                    .is_some_and(|at| at.elapsed() < recovery);
                if cooling {
                    self.record_rejection();
                    return false;
                }

                inner.state = CircuitState::HalfOpen;
                inner.probe_started = Some(Instant::now());
                self.update_state_metric(CircuitState::HalfOpen);
                tracing::info!(
                    breaker = %self.name,
                    state = %CircuitState::HalfOpen,
                    "Circuit breaker probing upstream"
                );
                true
            }
            CircuitState::HalfOpen => {
                // A probe that never reported back is considered lost.
                let probing = inner
                    .probe_started
                    .is_some_and(|at| at.elapsed() < recovery);
                if probing {
                    self.record_rejection();
                    return false;
                }

                inner.probe_started = Some(Instant::now());
                true
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.lock();
        counter!("circuit_breaker_successes_total", "breaker" => self.name.clone()).increment(1);

        inner.failures = 0;
        inner.probe_started = None;

        if inner.state != CircuitState::Closed {
            inner.state = CircuitState::Closed;
            self.update_state_metric(CircuitState::Closed);
            tracing::info!(
                breaker = %self.name,
                state = %CircuitState::Closed,
                "Circuit breaker closed"
            );
        }
    }

    pub fn record_failure(&self) {
        let mut inner = self.lock();
        counter!("circuit_breaker_failures_total", "breaker" => self.name.clone()).increment(1);

        inner.failures = inner.failures.saturating_add(1);
        inner.last_failure = Some(Instant::now());
        inner.last_failure_at = Some(Utc::now());
        inner.probe_started = None;

        let should_open = inner.state == CircuitState::HalfOpen
            || inner.failures >= self.config.failure_threshold;

        if should_open && inner.state != CircuitState::Open {
            inner.state = CircuitState::Open;
            self.update_state_metric(CircuitState::Open);
            tracing::warn!(
                breaker = %self.name,
                state = %CircuitState::Open,
                failures = inner.failures,
                threshold = self.config.failure_threshold,
                "Circuit breaker opened"
            );
        }
    }

    /// Forces the breaker back to `Closed` with zeroed counters.
    pub fn reset(&self) {
        let mut inner = self.lock();
        *inner = BreakerState::closed();
        self.update_state_metric(CircuitState::Closed);
        tracing::info!(breaker = %self.name, "Circuit breaker reset");
    }

    pub fn snapshot(&self) -> CircuitSnapshot {
        let inner = self.lock();
        CircuitSnapshot {
            state: inner.state,
            failures: inner.failures,
            failure_threshold: self.config.failure_threshold,
            recovery_timeout_ms: u64::try_from(self.config.recovery_timeout.as_millis())
                .unwrap_or(u64::MAX),
            last_failure_at: inner.last_failure_at,
        }
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    fn record_rejection(&self) {
        counter!("circuit_breaker_rejected_total", "breaker" => self.name.clone()).increment(1);
    }

    fn update_state_metric(&self, state: CircuitState) {
        gauge!("circuit_breaker_state", "breaker" => self.name.clone()).set(state.metric_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: u32) -> CircuitBreaker {
        CircuitBreaker::new(
            "test",
            CircuitBreakerConfig {
                failure_threshold: threshold,
                recovery_timeout: Duration::from_secs(60),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_opens_after_threshold() {
        let breaker = breaker(3);

        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.try_acquire());

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resets_failures() {
        let breaker = breaker(3);

        breaker.record_failure();
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();

        let snapshot = breaker.snapshot();
        assert_eq!(snapshot.state, CircuitState::Closed);
        assert_eq!(snapshot.failures, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_allows_single_probe() {
        let breaker = breaker(1);
        breaker.record_failure();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(!breaker.try_acquire());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(breaker.try_acquire());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        assert!(!breaker.try_acquire(), "second caller must wait for the probe");
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_success_closes() {
        let breaker = breaker(1);
        breaker.record_failure();
        tokio::time::advance(Duration::from_secs(60)).await;

        assert!(breaker.try_acquire());
        breaker.record_success();

        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.snapshot().failures, 0);
        assert!(breaker.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_failure_reopens() {
        let breaker = breaker(5);
        for _ in 0..5 {
            breaker.record_failure();
        }
        tokio::time::advance(Duration::from_secs(60)).await;

        assert!(breaker.try_acquire());
        breaker.record_failure();

        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lost_probe_is_replaced() {
        let breaker = breaker(1);
        breaker.record_failure();
        tokio::time::advance(Duration::from_secs(60)).await;

        assert!(breaker.try_acquire());
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(breaker.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset() {
        let breaker = breaker(1);
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);

        breaker.reset();

        let snapshot = breaker.snapshot();
        assert_eq!(snapshot.state, CircuitState::Closed);
        assert_eq!(snapshot.failures, 0);
        assert_eq!(snapshot.last_failure_at, None);
        assert!(breaker.try_acquire());
    }

    #[test]
    fn test_state_names() {
        assert_eq!(CircuitState::HalfOpen.to_string(), "HALF_OPEN");
        assert_eq!(
            serde_json::to_value(CircuitState::Open).unwrap(),
            serde_json::json!("OPEN")
        );
    }
}
