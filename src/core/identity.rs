//! Record identity - prefixed ULIDs for inventory records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix carried by every record id
const RECORD_PREFIX: &str = "REC";

/// Unique, opaque identifier for an inventory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Ulid);

impl RecordId {
    /// Generate a fresh id
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a `REC-<ULID>` string
    pub fn parse(s: &str) -> Result<Self, RecordIdError> {
        s.parse()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", RECORD_PREFIX, self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| RecordIdError::MissingDelimiter(s.to_string()))?;

        if prefix != RECORD_PREFIX {
            return Err(RecordIdError::InvalidPrefix(prefix.to_string()));
        }

        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| RecordIdError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing record ids
#[derive(Debug, Error)]
pub enum RecordIdError {
    #[error("invalid record id prefix: '{0}' (expected REC)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in record id: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}
