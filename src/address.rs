//! Dream address formatting and parsing.
//!
//! A dream is identified on the wire by a numeric ID, but displayed to humans
//! as a grouped dream address such as `DA-1234-5678-9012`: the ID zero-padded
//! to twelve digits and split into groups of four.
//!
//! # Examples
//!
//! ```rust
//! use dreamcatcher::address::DreamAddress;
//!
//! let address = DreamAddress::new(123456789012);
//! assert_eq!(address.to_string(), "DA-1234-5678-9012");
//!
//! let parsed: DreamAddress = "DA-1234-5678-9012".parse()?;
//! assert_eq!(parsed.id(), 123456789012);
//! # Ok::<(), dreamcatcher::Error>(())
//! ```

use crate::error::Error;

use std::fmt;
use std::str::FromStr;

/// Display prefix carried by formatted dream addresses.
const PREFIX: &str = "DA-";

/// A dream's numeric identifier together with its display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DreamAddress(u64);

impl DreamAddress {
    /// Wraps a raw numeric dream ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric ID.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DreamAddress {
    /// Renders the grouped form.
    ///
    /// The ID is zero-padded to at least twelve digits. IDs wider than twelve
    /// digits keep their surplus digits in the final group instead of being
    /// truncated, so the rendering stays lossless for every `u64`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format!("{:012}", self.0);
        write!(f, "{}{}-{}-{}", PREFIX, &digits[..4], &digits[4..8], &digits[8..])
    }
}

impl FromStr for DreamAddress {
    type Err = Error;

    /// Parses either the plain numeric form or the grouped `DA-` form.
    ///
    /// Inputs carrying the canonical prefix are stripped of the `D`, `A` and
    /// `-` characters before parsing, matching the batch-file convention.
    /// Anything that is not purely numeric afterwards is rejected.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let digits: String = if trimmed.starts_with(PREFIX) {
            trimmed
                .chars()
                .filter(|c| !matches!(c, 'D' | 'A' | '-'))
                .collect()
        } else {
            trimmed.to_string()
        };

        digits
            .parse::<u64>()
            .map(DreamAddress)
            .map_err(|_| Error::InvalidAddress(raw.to_string()))
    }
}

impl From<u64> for DreamAddress {
    fn from(id: u64) -> Self {
        DreamAddress::new(id)
    }
}
