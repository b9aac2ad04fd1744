//! Dreamcatcher is a batch retrieval client for dream land sharing servers.
//!
//! It resolves human-facing identifiers (numeric dream IDs, `DA-` formatted
//! addresses, island names, or the server's recommended list) against the
//! `/dream_query` endpoint, then streams each dream's binary payload and
//! MessagePack metadata from `/dream_download` and persists them under
//! `{DA-address}/{upload-timestamp}/`.
//!
//! Requests are paced with randomized delays to resemble interactive use,
//! nothing is retried, and a stream that dies mid-body yields its partial
//! payload with a warning instead of failing the run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dreamcatcher::retriever::RetrieverBuilder;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), dreamcatcher::Error> {
//! let retriever = RetrieverBuilder::for_server("192.168.1.20", 8080)
//!     .directory(PathBuf::from("dreams"))
//!     .build()?;
//!
//! let summary = retriever.download_by_id(123456789012).await;
//! if summary.is_saved() {
//!     println!("saved under {:?}", summary.location());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`address`] - Dream address formatting and parsing
//! - [`document`] - Schema-less MessagePack document handling
//! - [`record`] - Dream records decoded from query responses
//! - [`query`] - Lookup requests against the query endpoint
//! - [`fetch`] - Token-based streaming fetches with truncation tolerance
//! - [`pacing`] - Randomized inter-request delay policies
//! - [`retriever`] - The download-and-persist pipeline and batch modes
//! - [`http`] - HTTP client construction
//! - [`error`] - Centralized error handling

pub mod address;
pub mod document;
pub mod error;
pub mod fetch;
pub mod http;
pub mod pacing;
pub mod query;
pub mod record;
pub mod retriever;

pub use address::DreamAddress;
pub use document::{Document, UploadTime};
pub use error::{Error, Result};
pub use fetch::fetch_resource;
pub use http::{create_http_client, HttpClientConfig};
pub use pacing::PacingPolicy;
pub use query::{query_dreams, DreamFilter};
pub use record::DreamRecord;
pub use retriever::{Retriever, RetrieverBuilder, Status, Summary};
