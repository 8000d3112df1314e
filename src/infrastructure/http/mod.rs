//! Page retrieval over HTTP.
//!
//! [`HtmlFetcher`] runs single-attempt [`HttpTransport`] calls through the
//! resilience executor; [`FetchError`] carries the failure classification the
//! executor uses to decide whether to retry.

mod error;
mod fetcher;
mod transport;

pub use error::FetchError;
pub use fetcher::{FetcherOptions, HtmlFetcher};
pub use transport::{HttpTransport, ReqwestTransport};

#[cfg(test)]
pub use transport::MockHttpTransport;
