//! Core type definitions for gr-helper

use crate::error::{GrError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Gerrit comment
///
/// Gerrit ids are opaque strings. A blank id is rejected on construction, so
/// every `Comment` in this crate carries a usable identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentId(String);

impl CommentId {
    /// Create a CommentId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(GrError::MissingId);
        }
        Ok(CommentId(id))
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommentId {
    type Error = GrError;

    fn try_from(value: String) -> Result<Self> {
        CommentId::new(value)
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> Self {
        id.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Revision side a comment applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Old side (the parent revision)
    #[serde(rename = "PARENT")]
    Old,
    /// New side (the patch set itself)
    #[serde(rename = "REVISION")]
    New,
}

impl Side {
    /// Convert to short string for display
    pub fn to_short_string(&self) -> &'static str {
        match self {
            Side::Old => "old",
            Side::New => "new",
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Side::New
    }
}

/// Serde codec for Gerrit timestamps (`2013-02-26 15:40:43.986000000`, UTC)
pub mod gerrit_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";
    const READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    /// Parse a Gerrit timestamp
    pub fn parse(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s.trim(), READ_FORMAT).map(|naive| naive.and_utc())
    }

    /// Format a timestamp the way Gerrit writes it
    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.format(WRITE_FORMAT).to_string()
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
