//! Configuration for the dream retriever.
//!
//! One [`RetrieverConfig`] is built at the entry point (via
//! [`RetrieverBuilder`]) and threaded through every component; there is no
//! ambient global state. The three pacing policies cover the three places
//! the protocol expects a human-shaped pause.
//!
//! [`RetrieverBuilder`]: super::RetrieverBuilder

use crate::pacing::PacingPolicy;

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration structure for the retriever.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Base URL of the dream server, e.g. `http://192.168.1.20:8080`.
    pub base_url: String,
    /// Directory under which dream artifacts are stored.
    pub directory: PathBuf,
    /// Pause between metadata prefetch and the main body download.
    pub pre_download_pacing: PacingPolicy,
    /// Pause between items of an ID batch.
    pub batch_pacing: PacingPolicy,
    /// Pause between items of a recommended-list batch. Larger than
    /// [`Self::batch_pacing`]: recommendation sweeps are the most visible
    /// kind of bulk traffic.
    pub recommend_pacing: PacingPolicy,
    /// Per-request timeout; `None` keeps the transport's defaults.
    pub timeout: Option<Duration>,
    /// Custom HTTP headers sent with every request.
    pub headers: Option<HeaderMap>,
}

impl RetrieverConfig {
    /// Creates a configuration for the given server with default pacing and
    /// the current directory as output root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            directory: current_dir().unwrap_or_default(),
            pre_download_pacing: PacingPolicy::uniform(2.0, 3.0),
            batch_pacing: PacingPolicy::uniform(5.0, 10.0),
            recommend_pacing: PacingPolicy::uniform(10.0, 20.0),
            timeout: None,
            headers: None,
        }
    }
}
