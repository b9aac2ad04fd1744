//! HTTP client setup and middleware configuration.
//!
//! This module builds the reqwest client shared by the query and download
//! paths: tracing middleware for request/response logging, an optional
//! per-request timeout, optional default headers, and optional proxy support.
//!
//! There is deliberately no retry middleware. The dream-sharing protocol must
//! not re-issue failed requests; pacing delays are the only throttling
//! mitigation, and truncated bodies are handled downstream by the stream
//! fetcher.
//!
//! # Examples
//!
//! ```rust
//! use dreamcatcher::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::default();
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Per-request timeout covering the full response body.
    ///
    /// `None` leaves the transport's own socket behavior in place, which is
    /// the right default for large paced downloads.
    pub timeout: Option<Duration>,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

/// Creates the HTTP client used for all dream-server traffic.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let client = ClientBuilder::new(inner_client)
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}
