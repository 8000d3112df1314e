use std::time::Duration;

/// Exponential backoff parameters for [`super::ResilienceExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 are treated as 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scales each delay by a uniform factor in `[0.5, 1.0]`.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after `attempt` failed, without jitter.
    ///
    /// `min(base * multiplier^(attempt - 1), max)`, truncated to whole milliseconds.
    pub fn base_delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let raw = self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let capped = raw.min(self.max_delay.as_millis() as f64);

        Duration::from_millis(capped.floor() as u64)
    }

    /// Backoff before retrying after `attempt` failed, jitter applied when enabled.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let computed = self.base_delay_for(attempt);
        if !self.jitter {
            return computed;
        }

        let factor: f64 = rand::random_range(0.5..=1.0);
        computed.mul_f64(factor)
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
