//! Dynamic handling of the server's MessagePack documents.
//!
//! Query responses and dream metadata share a schema-less, dynamically typed
//! MessagePack encoding. Their shape is not contractually fixed, so this
//! module never reifies them into structs: a [`Document`] wraps an
//! [`rmpv::Value`] and exposes accessors that return `Option`s or defaults
//! instead of failing on missing keys.
//!
//! # Examples
//!
//! ```rust
//! use dreamcatcher::document::Document;
//! use rmpv::Value;
//!
//! let mut buf = Vec::new();
//! let map = Value::Map(vec![(Value::from("mMtVNm"), Value::from("Aloha"))]);
//! rmpv::encode::write_value(&mut buf, &map).unwrap();
//!
//! let doc = Document::decode(&buf)?;
//! assert_eq!(doc.str_field("mMtVNm"), Some("Aloha"));
//! assert_eq!(doc.str_field("missing"), None);
//! # Ok::<(), dreamcatcher::Error>(())
//! ```

use crate::error::{Error, Result};

use rmpv::Value;
use std::fmt;

/// A decoded MessagePack document of arbitrary shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Decodes a document from raw MessagePack bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = bytes;
        let root = rmpv::decode::read_value(&mut reader)?;
        Ok(Self { root })
    }

    /// Returns the underlying value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Looks up a top-level map entry by string key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        lookup(&self.root, key)
    }

    /// Looks up a top-level string field.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// The island name announced by dream metadata, when present.
    pub fn island_name(&self) -> Option<&str> {
        self.str_field("mMtVNm")
    }

    /// Extracts the upload timestamp from dream metadata.
    ///
    /// Every field of the nested `mMtCurUploadTime` structure defaults to 0
    /// when absent, so this is total: metadata without a timestamp yields
    /// `0000.00.00@00-00` rather than an error.
    pub fn upload_time(&self) -> UploadTime {
        let time = self.field("mMtCurUploadTime");
        UploadTime {
            year: int_or_zero(time, "mYear"),
            month: int_or_zero(time, "mMonth"),
            day: int_or_zero(time, "mDay"),
            hour: int_or_zero(time, "mHour"),
            minute: int_or_zero(time, "mMin"),
        }
    }

    /// Renders the document as pretty-printed JSON.
    ///
    /// Non-ASCII characters are kept literal, matching the UTF-8 metadata
    /// files written next to each payload.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root)
            .map_err(|e| Error::Decode(format!("metadata not representable as JSON: {e}")))
    }
}

/// Upload timestamp carried by dream metadata, minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTime {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
}

impl fmt::Display for UploadTime {
    /// Formats as `YYYY.MM.DD@HH-MM`, the directory-name form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}.{:02}.{:02}@{:02}-{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Finds a map entry by string key inside an arbitrary value.
pub(crate) fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .as_map()?
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

/// Integer field lookup with the default-to-zero policy.
fn int_or_zero(value: Option<&Value>, key: &str) -> i64 {
    value
        .and_then(|v| lookup(v, key))
        .and_then(Value::as_i64)
        .unwrap_or(0)
}
