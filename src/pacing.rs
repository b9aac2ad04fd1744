//! Randomized pacing between requests.
//!
//! The dream-sharing service is built for interactive clients; rapid
//! back-to-back requests look automated and get throttled. Every network
//! operation beyond the first in a sequence is therefore separated by a
//! uniformly random delay. The delay ranges are policy objects injected
//! through the retriever configuration, so tests swap them for
//! [`PacingPolicy::disabled`] and stay fast.

use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// A uniform random delay range, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingPolicy {
    range: Option<(f64, f64)>,
}

impl PacingPolicy {
    /// A policy sleeping between `min_secs` and `max_secs` seconds.
    pub fn uniform(min_secs: f64, max_secs: f64) -> Self {
        debug_assert!(min_secs <= max_secs);
        Self {
            range: Some((min_secs, max_secs)),
        }
    }

    /// A policy that never sleeps. Meant for tests.
    pub fn disabled() -> Self {
        Self { range: None }
    }

    /// Whether this policy ever sleeps.
    pub fn is_disabled(&self) -> bool {
        self.range.is_none()
    }

    /// Draws one delay from the range.
    pub fn sample(&self) -> Duration {
        match self.range {
            Some((min, max)) => Duration::from_secs_f64(rand::rng().random_range(min..=max)),
            None => Duration::ZERO,
        }
    }

    /// Sleeps for one sampled delay.
    pub async fn pause(&self) {
        let delay = self.sample();
        if delay.is_zero() {
            return;
        }
        debug!(seconds = delay.as_secs_f64(), "pacing delay");
        tokio::time::sleep(delay).await;
    }
}
