//! Retriever module containing the core orchestration logic.
//!
//! This module turns resolved dream records into on-disk artifacts and hosts
//! the batch entry points built on top of that:
//!
//! - `retriever` - the sequential download-and-persist pipeline
//! - `batch` - per-identifier entry points with failure isolation
//! - `builder` - [`RetrieverBuilder`] for configuration
//! - `config` - [`RetrieverConfig`] and its defaults
//! - `summary` - per-item [`Summary`]/[`Status`] reporting
//!
//! # Examples
//!
//! ```rust,no_run
//! use dreamcatcher::retriever::RetrieverBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), dreamcatcher::Error> {
//! let retriever = RetrieverBuilder::for_server("192.168.1.20", 8080)
//!     .directory(PathBuf::from("./dreams"))
//!     .build()?;
//!
//! let summary = retriever.download_by_id(123456789012).await;
//! println!("{:?}", summary.status());
//! # Ok(())
//! # }
//! ```

mod batch;
pub mod builder;
pub mod config;
pub mod retriever;
pub mod summary;

pub use builder::RetrieverBuilder;
pub use config::RetrieverConfig;
pub use retriever::{Retriever, META_FILE, PAYLOAD_FILE};
pub use summary::{Status, Summary};
