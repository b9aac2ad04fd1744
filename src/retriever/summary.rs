//! Per-item retrieval results.
//!
//! Every dream handled by the retriever or a batch run produces one
//! [`Summary`], whether it was persisted, found nothing on the server, or
//! failed along the way. Batches never abort on a failed item; the summaries
//! are how callers see what actually happened.

use std::path::PathBuf;

/// Outcome of one dream retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Both artifacts were written to disk.
    Saved,
    /// The query matched nothing; a normal outcome, not an error.
    NoMatch,
    /// Retrieval failed with an error message.
    Fail(String),
}

/// Represents one dream's retrieval summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// What was being retrieved: a dream address, or an island name for
    /// name-based lookups that never resolved to an address.
    subject: String,
    /// Outcome.
    status: Status,
    /// Directory the artifacts were written to, when saved.
    location: Option<PathBuf>,
    /// Payload size in bytes, when saved.
    payload_size: u64,
}

impl Summary {
    /// Summary for a persisted dream.
    pub fn saved(subject: impl Into<String>, location: PathBuf, payload_size: u64) -> Self {
        Self {
            subject: subject.into(),
            status: Status::Saved,
            location: Some(location),
            payload_size,
        }
    }

    /// Summary for a query that matched nothing.
    pub fn no_match(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            status: Status::NoMatch,
            location: None,
            payload_size: 0,
        }
    }

    /// Summary for a failed retrieval.
    pub fn fail(subject: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self {
            subject: subject.into(),
            status: Status::Fail(format!("{msg}")),
            location: None,
            payload_size: 0,
        }
    }

    /// What was being retrieved.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Get the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Directory the artifacts landed in, when saved.
    pub fn location(&self) -> Option<&PathBuf> {
        self.location.as_ref()
    }

    /// Payload size in bytes.
    pub fn payload_size(&self) -> u64 {
        self.payload_size
    }

    /// Whether the dream was persisted.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.status == Status::Saved
    }
}
