//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Per-client key: the socket peer address, or the forwarded client address when
/// the service runs behind a trusted reverse proxy.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates a rate limiter for the article endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 30 requests
///
/// A search fetches the upstream blog, so the limit is deliberately low.
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// See [`ClientIpKeyExtractor`].
///
/// # Errors
///
/// Fails only if the quota constants are zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api", article_routes())
///     .layer(rate_limit::layer(false)?);
/// ```
pub fn layer(
    behind_proxy: bool,
) -> Result<GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(1)
        .burst_size(30)
        .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
        .finish()
        .context("Invalid rate limiter configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
