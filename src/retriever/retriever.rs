//! Core retriever implementation.
//!
//! The retriever turns one [`DreamRecord`] into on-disk artifacts:
//!
//! 1. Reject records without content entries.
//! 2. Prefetch the metadata document, best-effort, to log the island name.
//! 3. Pause (pre-download pacing).
//! 4. Fetch the binary body via the first content token.
//! 5. Fetch the metadata document a second time. The server expects this
//!    sequence from interactive clients; the prefetched copy is never reused.
//! 6. Decode the refetched metadata and derive the storage path from the
//!    upload timestamp.
//! 7. Write `dream_land.dat`, then `dream_land_meta.json`.
//!
//! Steps run strictly in order. A fatal error aborts the current dream
//! without touching artifacts written by earlier steps; there is no
//! cleanup and no atomicity across the two writes.

use super::config::RetrieverConfig;
use super::summary::Summary;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::fetch::fetch_resource;
use crate::http::{create_http_client, HttpClientConfig};
use crate::query::{query_dreams, DreamFilter};
use crate::record::DreamRecord;

use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

/// File name of the binary dream payload.
pub const PAYLOAD_FILE: &str = "dream_land.dat";
/// File name of the pretty-printed metadata document.
pub const META_FILE: &str = "dream_land_meta.json";

/// Represents the retrieval controller.
///
/// A retriever can be created via its builder:
///
/// ```rust
/// # fn main() -> Result<(), dreamcatcher::Error> {
/// use dreamcatcher::retriever::RetrieverBuilder;
///
/// let r = RetrieverBuilder::for_server("127.0.0.1", 8080).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Retriever {
    client: ClientWithMiddleware,
    config: RetrieverConfig,
}

impl fmt::Debug for Retriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retriever")
            .field("config", &self.config)
            .finish()
    }
}

impl Retriever {
    /// Creates a new Retriever with the given configuration.
    pub(crate) fn new(config: RetrieverConfig) -> Result<Self> {
        let client = create_http_client(HttpClientConfig {
            timeout: config.timeout,
            proxy: None,
            headers: config.headers.clone(),
        })?;
        Ok(Self { client, config })
    }

    /// Gets the base URL of the dream server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Gets the directory where dreams will be stored.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    pub(crate) fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Queries the server for dreams matching `filter`.
    pub async fn query(&self, filter: &DreamFilter) -> Result<Vec<DreamRecord>> {
        query_dreams(&self.client, &self.config.base_url, filter).await
    }

    /// Fetches one resource by token.
    pub async fn fetch(&self, token: &str) -> Result<Vec<u8>> {
        fetch_resource(&self.client, &self.config.base_url, token).await
    }

    /// Fetches and decodes one MessagePack document by token.
    async fn fetch_document(&self, token: &str) -> Result<Document> {
        let raw = self.fetch(token).await?;
        Document::decode(&raw)
    }

    /// Materializes one dream record into on-disk artifacts.
    ///
    /// Returns the saved [`Summary`] on success. Errors abort this dream
    /// only; callers running batches convert them into failed summaries and
    /// keep going.
    pub async fn retrieve(&self, record: &DreamRecord) -> Result<Summary> {
        let address = record.address();
        let body_token = record
            .content_tokens
            .first()
            .ok_or(Error::EmptyContents)?;

        info!(%address, "downloading dream");

        // Best-effort look at the metadata so the log shows where we are
        // going; a failure here must not stop the retrieval.
        match self.fetch_document(&record.meta_token).await {
            Ok(doc) => {
                info!(
                    %address,
                    island = doc.island_name().unwrap_or("?"),
                    "found island, downloading"
                );
            }
            Err(e) => {
                warn!(%address, error = %e, "could not read dream metadata ahead of download");
            }
        }

        // Waiting to resemble interactive use before the heavy request.
        self.config.pre_download_pacing.pause().await;

        let body = self.fetch(body_token).await?;

        // The metadata must be fetched again after the body; the server
        // expects the pair of requests and the first copy is never reused.
        let meta = self.fetch_document(&record.meta_token).await?;

        let target_dir = self
            .config
            .directory
            .join(address.to_string())
            .join(meta.upload_time().to_string());
        debug!("creating destination directory {:?}", target_dir);
        fs::create_dir_all(&target_dir).await?;

        let payload_path = target_dir.join(PAYLOAD_FILE);
        debug!("writing payload to {:?}", payload_path);
        fs::write(&payload_path, &body).await?;

        let meta_path = target_dir.join(META_FILE);
        debug!("writing metadata to {:?}", meta_path);
        fs::write(&meta_path, meta.to_json_pretty()?).await?;

        info!(
            %address,
            bytes = body.len(),
            location = %target_dir.display(),
            "dream saved"
        );

        Ok(Summary::saved(
            address.to_string(),
            target_dir,
            body.len() as u64,
        ))
    }
}
