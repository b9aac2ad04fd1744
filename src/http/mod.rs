//! HTTP module containing client construction for dream-server traffic.
//!
//! Both remote endpoints (`/dream_query` and `/dream_download`) share one
//! middleware-wrapped reqwest client created here. See [`client`] for the
//! configuration knobs and the no-retry policy.

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
