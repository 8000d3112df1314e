use crate::infrastructure::resilience::Retryable;

/// Failure of a single page fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("DNS resolution failed for {url}")]
    DnsFailure { url: String },

    #[error("Connection refused to {url}")]
    ConnectionRefused { url: String },

    #[error("HTTP {status}: {reason}")]
    BadStatus { status: u16, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl FetchError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadStatus { status, .. } if (400..500).contains(status))
    }
}

impl Retryable for FetchError {
    /// DNS failures, 4xx responses, malformed URLs, protocol and certificate
    /// errors will not fix themselves between attempts.
    fn is_retryable(&self) -> bool {
        match self {
            Self::DnsFailure { .. }
            | Self::InvalidUrl(_)
            | Self::Protocol(_)
            | Self::Certificate(_) => false,
            Self::BadStatus { .. } => !self.is_client_error(),
            Self::Timeout { .. } | Self::ConnectionRefused { .. } | Self::Network(_) => true,
        }
    }
}
