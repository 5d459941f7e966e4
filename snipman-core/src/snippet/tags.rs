//! Tag list editing
//!
//! Mirrors the chip input of the snippet form: tags are trimmed, empty input
//! is ignored, exact duplicates are rejected and backspace on an empty input
//! drops the last tag.

use serde::{Deserialize, Serialize};

/// Ordered list of unique tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses comma separated input
    #[must_use]
    pub fn parse_csv(input: &str) -> Self {
        input.split(',').collect()
    }

    /// Adds a tag after trimming it
    ///
    /// Returns false if the trimmed tag is empty or already present.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Removes an exact match; returns whether anything was removed
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Removes and returns the last tag
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// Returns true if `tag` is present (exact match)
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Returns the tags in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the list
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for tag in iter {
            list.add(tag.as_ref());
        }
        list
    }
}

impl From<TagList> for Vec<String> {
    fn from(list: TagList) -> Self {
        list.0
    }
}
