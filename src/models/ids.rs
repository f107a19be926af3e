//! Strongly-typed ID wrapper for expense records
//!
//! A newtype around UUID so record identifiers cannot be confused with other
//! strings. Identifiers coming from foreign stores that are not UUIDs are
//! mapped onto stable name-based UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix used when displaying record IDs
pub const RECORD_ID_PREFIX: &str = "exp-";

/// Unique identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive a stable ID from a foreign identifier (e.g. a database object id)
    ///
    /// The same input always yields the same ID.
    pub fn from_foreign(key: &str) -> Self {
        if let Ok(uuid) = Uuid::parse_str(key) {
            return Self(uuid);
        }
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a full UUID string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Check whether a user-supplied identifier refers to this ID
    ///
    /// Accepts the full UUID, the short display form, or a bare hex prefix
    /// of at least four characters.
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim().to_ascii_lowercase();
        let bare = identifier
            .strip_prefix(RECORD_ID_PREFIX)
            .unwrap_or(&identifier);
        if bare.len() < 4 {
            return false;
        }
        self.0.to_string().starts_with(bare)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", RECORD_ID_PREFIX, &self.0.to_string()[..8])
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(uuid) = Uuid::parse_str(s) {
            return Ok(Self(uuid));
        }
        let s = s.strip_prefix(RECORD_ID_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
