//! Dream records as returned by the query endpoint.

use crate::address::DreamAddress;
use crate::document::lookup;
use crate::error::{Error, Result};

use rmpv::Value;

/// One retrievable dream: its ID plus the opaque tokens handed out by the
/// server for the metadata document and each content entry.
///
/// Records are transient; they live exactly as long as the retrieval that
/// consumes them and are never persisted themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreamRecord {
    /// Numeric dream ID.
    pub id: u64,
    /// Token resolving to the MessagePack metadata document.
    pub meta_token: String,
    /// Tokens resolving to the binary content entries, in server order.
    pub content_tokens: Vec<String>,
}

impl DreamRecord {
    /// Decodes a record from one entry of a query response's `dreams` list.
    ///
    /// A missing `contents` list decodes as an empty one; the retriever
    /// rejects such records later without treating the response as malformed.
    pub fn from_value(value: &Value) -> Result<Self> {
        let id = lookup(value, "id")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::Decode("dream entry missing numeric id".into()))?;

        let meta_token = lookup(value, "meta")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Decode(format!("dream {id} missing meta token")))?
            .to_string();

        let content_tokens = match lookup(value, "contents").and_then(Value::as_array) {
            Some(entries) => entries
                .iter()
                .map(|entry| {
                    lookup(entry, "url")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or_else(|| Error::Decode(format!("dream {id} content entry missing url")))
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            id,
            meta_token,
            content_tokens,
        })
    }

    /// The record's ID in display form.
    pub fn address(&self) -> DreamAddress {
        DreamAddress::new(self.id)
    }
}
