//! Lookup requests against the dream query endpoint.
//!
//! A [`DreamFilter`] names the server-side selection (by ID, by island name,
//! or the curated recommendation list) and [`query_dreams`] resolves it into
//! decoded [`DreamRecord`]s. An empty result is a normal outcome: servers
//! answer unknown IDs with an empty `dreams` list, not an error status.

use crate::document::Document;
use crate::error::Result;
use crate::record::DreamRecord;

use reqwest_middleware::ClientWithMiddleware;
use rmpv::Value;
use tracing::debug;

/// Server-side selection criteria understood by the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DreamFilter {
    /// Look up one dream by its numeric ID.
    Id(u64),
    /// Look up dreams by island name.
    LandName(String),
    /// The server's recommended list for a language code such as `en-GB`.
    Recommended { lang: String },
}

impl DreamFilter {
    /// The query parameters this filter maps to.
    ///
    /// `recommend` is a valueless flag on the wire; it is sent as an empty
    /// value alongside the language code.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            DreamFilter::Id(id) => vec![("id", id.to_string())],
            DreamFilter::LandName(name) => vec![("land_name", name.clone())],
            DreamFilter::Recommended { lang } => {
                vec![("recommend", String::new()), ("lang", lang.clone())]
            }
        }
    }
}

/// Queries the server for dreams matching `filter`.
///
/// Returns an empty vector when the response carries no `dreams` list or an
/// empty one. Non-success statuses and connection failures are fatal; the
/// request is never retried.
pub async fn query_dreams(
    client: &ClientWithMiddleware,
    base_url: &str,
    filter: &DreamFilter,
) -> Result<Vec<DreamRecord>> {
    let url = format!("{base_url}/dream_query");
    debug!(%url, ?filter, "querying dreams");

    let response = client
        .get(&url)
        .query(&filter.query_params())
        .send()
        .await?
        .error_for_status()?;

    let body = response.bytes().await?;
    let document = Document::decode(&body)?;

    let records = match document.field("dreams").and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .map(DreamRecord::from_value)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    debug!(count = records.len(), "query resolved");
    Ok(records)
}
