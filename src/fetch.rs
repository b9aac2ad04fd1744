//! Streaming fetches from the dream download endpoint.
//!
//! The endpoint takes an opaque token as the raw POST body and streams back
//! either a binary payload or a MessagePack metadata document; only the token
//! determines which. Bodies are accumulated chunk by chunk.
//!
//! The one unusual policy lives here: servers routinely close a transfer
//! before the terminal chunk, and re-requesting is expensive on this
//! human-paced protocol. A stream that dies mid-body is therefore downgraded
//! to a warning and whatever arrived is returned as the payload. Failures
//! before any body bytes (refused connection, non-success status) stay fatal.

use crate::error::Result;

use futures::StreamExt;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, warn};

/// Fetches one resource by token, tolerating a truncated stream.
///
/// Each call owns its accumulation buffer exclusively; nothing is shared or
/// pooled across fetches.
pub async fn fetch_resource(
    client: &ClientWithMiddleware,
    base_url: &str,
    token: &str,
) -> Result<Vec<u8>> {
    let url = format!("{base_url}/dream_download");
    debug!(%url, token, "fetching resource");

    let response = client
        .post(&url)
        .body(token.to_string())
        .send()
        .await?
        .error_for_status()?;

    let mut data = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => data.extend_from_slice(&chunk),
            Err(e) => {
                // Server closed early: treat what we got as the full body.
                warn!(
                    token,
                    received = data.len(),
                    error = %e,
                    "incomplete read, keeping partial payload"
                );
                break;
            }
        }
    }

    debug!(token, bytes = data.len(), "resource fetched");
    Ok(data)
}
