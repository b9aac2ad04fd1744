//! Builder pattern implementation for creating Retriever instances.
//!
//! # Examples
//!
//! ```rust
//! use dreamcatcher::retriever::RetrieverBuilder;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), dreamcatcher::Error> {
//! let retriever = RetrieverBuilder::for_server("192.168.1.20", 8080)
//!     .directory(PathBuf::from("./dreams"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::RetrieverConfig, retriever::Retriever};
use crate::error::Result;
use crate::pacing::PacingPolicy;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::path::PathBuf;
use std::time::Duration;

/// A builder used to create a [`Retriever`].
pub struct RetrieverBuilder {
    config: RetrieverConfig,
}

impl RetrieverBuilder {
    /// Creates a builder targeting a server by base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: RetrieverConfig::new(base_url),
        }
    }

    /// Creates a builder targeting `http://{host}:{port}`.
    pub fn for_server(host: &str, port: u16) -> Self {
        Self::new(format!("http://{host}:{port}"))
    }

    /// Sets the directory under which dreams are stored.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Sets the pause before each main body download.
    pub fn pre_download_pacing(mut self, policy: PacingPolicy) -> Self {
        self.config.pre_download_pacing = policy;
        self
    }

    /// Sets the pause between ID-batch items.
    pub fn batch_pacing(mut self, policy: PacingPolicy) -> Self {
        self.config.batch_pacing = policy;
        self
    }

    /// Sets the pause between recommended-list items.
    pub fn recommend_pacing(mut self, policy: PacingPolicy) -> Self {
        self.config.recommend_pacing = policy;
        self
    }

    /// Convenience function to disable every pacing delay.
    ///
    /// Meant for tests; against a real server this makes the client look
    /// exactly like the bulk traffic the delays exist to avoid.
    pub fn unpaced(mut self) -> Self {
        self.config.pre_download_pacing = PacingPolicy::disabled();
        self.config.batch_pacing = PacingPolicy::disabled();
        self.config.recommend_pacing = PacingPolicy::disabled();
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Adds HTTP headers sent with every request.
    ///
    /// May be called multiple times; all maps are merged into one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Adds a single HTTP header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Creates the [`Retriever`] with the specified options.
    pub fn build(self) -> Result<Retriever> {
        Retriever::new(self.config)
    }
}
