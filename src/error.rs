//! Error handling for the dreamcatcher library.
//!
//! This module provides centralized error handling for everything that can go
//! wrong while resolving and retrieving dreams. All errors implement the
//! standard Error trait and carry enough context to identify the failing item.
//!
//! Truncated download streams are deliberately not represented here: the
//! stream fetcher downgrades them to warnings and keeps the partial payload,
//! so they can never escape as errors.

use std::io;
use thiserror::Error;

/// Errors that can happen when using dreamcatcher.
///
/// A variant is always fatal to the dream currently being retrieved, never to
/// the surrounding batch; the batch runner records it and moves on.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the HTTP middleware stack.
    ///
    /// Connection refused, DNS failure, or a request that never produced a
    /// response. No request is ever retried.
    #[error("transport error")]
    Transport {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Error from the underlying HTTP client, including non-success statuses.
    #[error("request failed")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// A response document (query result or dream metadata) could not be
    /// decoded, or did not have the expected shape.
    #[error("malformed response document: {0}")]
    Decode(String),

    /// The dream record carries no downloadable content entries.
    #[error("dream has no downloadable contents")]
    EmptyContents,

    /// A user-supplied dream address could not be parsed.
    #[error("invalid dream address: {0:?}")]
    InvalidAddress(String),

    /// I/O error while persisting artifacts to disk.
    #[error("I/O error")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl From<rmpv::decode::Error> for Error {
    fn from(source: rmpv::decode::Error) -> Self {
        Error::Decode(source.to_string())
    }
}

/// Result type alias for operations that can fail with a dreamcatcher error.
pub type Result<T> = std::result::Result<T, Error>;
