//! Snippet model for stored code fragments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point in time as emitted by the snippet store
///
/// Ordering compares `seconds` first, then `nanoseconds`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch
    #[serde(default)]
    pub seconds: i64,
    /// Sub-second part
    #[serde(default)]
    pub nanoseconds: u32,
}

impl Timestamp {
    /// Creates a timestamp from whole seconds
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self {
            seconds,
            nanoseconds: 0,
        }
    }

    /// Returns the current time
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Converts to a `chrono` date-time, if representable
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanoseconds: value.timestamp_subsec_nanos(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "{}s", self.seconds),
        }
    }
}

/// A stored code snippet
///
/// Every field has a serde default so that incomplete records coming from
/// the store still decode; missing text simply fails string predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Opaque unique identifier
    #[serde(default)]
    pub id: String,
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Code body
    #[serde(default)]
    pub code: String,
    /// Language identifier, compared case-insensitively by the dashboard filter
    #[serde(default)]
    pub language: String,
    /// Tags for searching
    #[serde(default)]
    pub tags: Vec<String>,
    /// Owner of the snippet
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    /// Creation time
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Snippet {
    /// Creates a new snippet with a fresh id and the current time
    #[must_use]
    pub fn new(title: impl Into<String>, language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            code: code.into(),
            language: language.into(),
            tags: Vec::new(),
            user_id: String::new(),
            created_at: Timestamp::now(),
        }
    }

    /// Sets the tags for this snippet
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the creation time for this snippet
    #[must_use]
    pub const fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the owner of this snippet
    #[must_use]
    pub fn with_owner(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the id of this snippet
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// The editable part of a snippet, as submitted by the snippet form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetDraft {
    /// Title
    pub title: String,
    /// Code body
    pub code: String,
    /// Language identifier
    pub language: String,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SnippetDraft {
    /// Creates a draft with no tags
    #[must_use]
    pub fn new(title: impl Into<String>, language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            language: language.into(),
            tags: Vec::new(),
        }
    }

    /// Sets the tags for this draft
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

impl From<&Snippet> for SnippetDraft {
    fn from(snippet: &Snippet) -> Self {
        Self {
            title: snippet.title.clone(),
            code: snippet.code.clone(),
            language: snippet.language.clone(),
            tags: snippet.tags.clone(),
        }
    }
}
