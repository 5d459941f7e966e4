//! Dashboard filtering and sorting
//!
//! This module turns the full in-memory snippet list into the list the
//! dashboard renders. All criteria live in an immutable [`FilterState`];
//! the functions here are pure and never touch their input, so they can be
//! re-run on every keystroke or store update.
//!
//! Three filters are combined with logical AND:
//!
//! - **Language dropdown**: `All` (any case) passes everything, otherwise the
//!   snippet language must equal the value case-insensitively.
//! - **Selected languages**: an empty set passes everything, otherwise the
//!   snippet language must be a member (exact, case-sensitive).
//! - **Search query**: an empty query passes everything, otherwise the query
//!   must occur case-insensitively in the title or in any tag.
//!
//! The two language filters overlap and are applied independently.

mod collate;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Snippet;

pub use collate::locale_compare;

/// Value of the language dropdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LanguageFilter {
    /// No language restriction
    #[default]
    All,
    /// Only snippets in this language (compared case-insensitively)
    Only(String),
}

impl LanguageFilter {
    /// Keyword that selects every language
    pub const ALL: &'static str = "All";

    /// Parses a dropdown value; `all` in any case maps to [`LanguageFilter::All`]
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case(Self::ALL) {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Returns true if a snippet in `language` passes this filter
    #[must_use]
    pub fn accepts(&self, language: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => language.to_lowercase() == wanted.to_lowercase(),
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Only(language) => f.write_str(language),
        }
    }
}

impl From<&str> for LanguageFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for LanguageFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LanguageFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Most recent first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Title A-Z
    Name,
    /// Title Z-A
    NameDesc,
    /// Keep input order
    Unsorted,
}

impl SortKey {
    /// All keys the dashboard offers, in dropdown order
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::Name, Self::NameDesc];

    /// Parses a sort key; unknown text maps to [`SortKey::Unsorted`]
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "name" => Self::Name,
            "name-desc" => Self::NameDesc,
            _ => Self::Unsorted,
        }
    }

    /// Returns the key string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Name => "name",
            Self::NameDesc => "name-desc",
            Self::Unsorted => "none",
        }
    }

    /// Returns the dropdown label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::Name => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::Unsorted => "Unsorted",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for SortKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Immutable set of dashboard criteria
///
/// Every `with_*` method returns a new state; the previous one is untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Language dropdown value
    #[serde(default)]
    pub language: LanguageFilter,
    /// Languages ticked in the sidebar
    #[serde(default)]
    pub selected_languages: BTreeSet<String>,
    /// Free-text search
    #[serde(default)]
    pub query: String,
    /// Ordering
    #[serde(default)]
    pub sort: SortKey,
}

impl FilterState {
    /// Creates the default state: all languages, no query, newest first
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language dropdown value
    #[must_use]
    pub fn with_language(mut self, language: impl Into<LanguageFilter>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the selected-languages set
    #[must_use]
    pub fn with_selected_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the search query
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the sort key
    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true when no filter narrows the list
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.language == LanguageFilter::All
            && self.selected_languages.is_empty()
            && self.query.is_empty()
    }

    /// Returns true if `snippet` passes every active filter
    #[must_use]
    pub fn matches(&self, snippet: &Snippet) -> bool {
        self.language.accepts(&snippet.language)
            && self.selected_accepts(&snippet.language)
            && self.query_matches(snippet)
    }

    fn selected_accepts(&self, language: &str) -> bool {
        self.selected_languages.is_empty() || self.selected_languages.contains(language)
    }

    fn query_matches(&self, snippet: &Snippet) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        snippet.title.to_lowercase().contains(&needle)
            || snippet
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Returns the snippets that pass every filter in `state`, in input order
#[must_use]
pub fn filter_snippets<'a>(snippets: &'a [Snippet], state: &FilterState) -> Vec<&'a Snippet> {
    snippets.iter().filter(|s| state.matches(s)).collect()
}

/// Orders `snippets` by `key`
///
/// The sort is stable, so snippets with equal keys keep their relative order.
#[must_use]
pub fn sort_snippets(mut snippets: Vec<&Snippet>, key: SortKey) -> Vec<&Snippet> {
    match key {
        SortKey::Newest => {
            snippets.sort_by(|a, b| b.created_at.seconds.cmp(&a.created_at.seconds));
        }
        SortKey::Oldest => {
            snippets.sort_by(|a, b| a.created_at.seconds.cmp(&b.created_at.seconds));
        }
        SortKey::Name => snippets.sort_by(|a, b| locale_compare(&a.title, &b.title)),
        SortKey::NameDesc => snippets.sort_by(|a, b| locale_compare(&b.title, &a.title)),
        SortKey::Unsorted => {}
    }
    snippets
}

/// Filters then sorts, borrowing from the input
#[must_use]
pub fn view<'a>(snippets: &'a [Snippet], state: &FilterState) -> Vec<&'a Snippet> {
    let filtered = filter_snippets(snippets, state);
    let visible = sort_snippets(filtered, state.sort);
    debug!(
        total = snippets.len(),
        visible = visible.len(),
        sort = %state.sort,
        "Applied snippet filter"
    );
    visible
}

/// Filters then sorts, returning owned copies
#[must_use]
pub fn apply(snippets: &[Snippet], state: &FilterState) -> Vec<Snippet> {
    view(snippets, state).into_iter().cloned().collect()
}
