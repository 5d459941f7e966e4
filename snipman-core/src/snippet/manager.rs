//! Snippet manager for CRUD operations
//!
//! This module provides the `SnippetManager` which handles creating, reading,
//! updating, and deleting snippets with persistence through `ConfigManager`,
//! and publishes the full list to subscribers after every change.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::config::ConfigManager;
use crate::error::{StoreError, StoreResult, ValidationErrors};
use crate::models::{Snippet, SnippetDraft, Timestamp};
use crate::validation::validate_snippet;

use super::feed::SnippetFeed;
use super::tags::TagList;
use super::SnippetStore;

/// Manager for snippet CRUD operations
///
/// Keeps snippets in insertion order, persists through `ConfigManager`
/// and pushes every new list to its feed.
#[derive(Debug)]
pub struct SnippetManager {
    /// In-memory snippet storage in insertion order
    snippets: Vec<Snippet>,
    /// Configuration manager for persistence
    config_manager: ConfigManager,
    /// Publisher for "list replaced" events
    publisher: watch::Sender<Arc<Vec<Snippet>>>,
}

impl SnippetManager {
    /// Creates a new `SnippetManager` with the given `ConfigManager`
    ///
    /// Loads existing snippets from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if loading from storage fails.
    pub fn new(config_manager: ConfigManager) -> StoreResult<Self> {
        let snippets = config_manager.load_snippets()?;
        Ok(Self::with_snippets(config_manager, snippets))
    }

    /// Creates a new SnippetManager with empty storage (for testing)
    #[cfg(test)]
    pub fn new_empty(config_manager: ConfigManager) -> Self {
        Self::with_snippets(config_manager, Vec::new())
    }

    fn with_snippets(config_manager: ConfigManager, snippets: Vec<Snippet>) -> Self {
        let (publisher, _) = watch::channel(Arc::new(snippets.clone()));
        Self {
            snippets,
            config_manager,
            publisher,
        }
    }

    // ========== Snippet CRUD Operations ==========

    /// Validates a draft and stores it as a new snippet
    ///
    /// Tags are trimmed and de-duplicated. The snippet gets a fresh id and
    /// the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or persistence fails.
    pub fn create_snippet(&mut self, draft: SnippetDraft, owner: &str) -> StoreResult<String> {
        validate_snippet(&draft)?;

        let snippet = Snippet {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            code: draft.code,
            language: draft.language,
            tags: draft.tags.iter().collect::<TagList>().into_vec(),
            user_id: owner.to_string(),
            created_at: Timestamp::now(),
        };
        let id = snippet.id.clone();

        let mut next = self.snippets.clone();
        next.push(snippet);
        self.commit(next)?;
        info!(%id, "Created snippet");

        Ok(id)
    }

    /// Stores a complete snippet record
    ///
    /// Useful for importing snippets or restoring from backup. An existing
    /// snippet with the same id is replaced in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, validation fails or
    /// persistence fails.
    pub fn create_snippet_from(&mut self, snippet: Snippet) -> StoreResult<String> {
        let mut errors = ValidationErrors::new();
        if snippet.id.is_empty() {
            errors.push("id", "Id is required");
        }
        if let Err(draft_errors) = validate_snippet(&SnippetDraft::from(&snippet)) {
            for error in draft_errors.errors() {
                errors.push(error.field, error.message.clone());
            }
        }
        errors.into_result()?;

        let id = snippet.id.clone();
        let mut next = self.snippets.clone();
        match self.position(&id) {
            Some(index) => next[index] = snippet,
            None => next.push(snippet),
        }
        self.commit(next)?;

        Ok(id)
    }

    /// Updates the editable fields of an existing snippet
    ///
    /// Preserves the id, owner and creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet doesn't exist, validation fails,
    /// or persistence fails.
    pub fn update_snippet(&mut self, id: &str, draft: SnippetDraft) -> StoreResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        validate_snippet(&draft)?;

        let mut next = self.snippets.clone();
        let existing = &mut next[index];
        existing.title = draft.title;
        existing.code = draft.code;
        existing.language = draft.language;
        existing.tags = draft.tags.iter().collect::<TagList>().into_vec();

        self.commit(next)?;
        info!(%id, "Updated snippet");
        Ok(())
    }

    /// Deletes a snippet by id
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet doesn't exist or persistence fails.
    pub fn delete_snippet(&mut self, id: &str) -> StoreResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut next = self.snippets.clone();
        next.remove(index);
        self.commit(next)?;
        info!(%id, "Deleted snippet");
        Ok(())
    }

    /// Gets a snippet by id
    #[must_use]
    pub fn get_snippet(&self, id: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    /// Lists all snippets in insertion order
    #[must_use]
    pub fn list_snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Lists the snippets belonging to `owner`
    #[must_use]
    pub fn list_for_owner(&self, owner: &str) -> Vec<&Snippet> {
        self.snippets.iter().filter(|s| s.user_id == owner).collect()
    }

    /// Returns the total number of snippets
    #[must_use]
    pub fn snippet_count(&self) -> usize {
        self.snippets.len()
    }

    // ========== Language/Tag Listings ==========

    /// Gets all languages in use, sorted and de-duplicated
    #[must_use]
    pub fn all_languages(&self) -> Vec<String> {
        self.snippets
            .iter()
            .filter(|s| !s.language.is_empty())
            .map(|s| s.language.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Gets all tags in use, sorted and de-duplicated
    #[must_use]
    pub fn all_tags(&self) -> Vec<String> {
        self.snippets
            .iter()
            .flat_map(|s| s.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    // ========== Change Feed ==========

    /// Subscribes to "list replaced" events
    #[must_use]
    pub fn subscribe(&self) -> SnippetFeed {
        SnippetFeed::new(self.publisher.subscribe())
    }

    // ========== Persistence ==========

    fn position(&self, id: &str) -> Option<usize> {
        self.snippets.iter().position(|s| s.id == id)
    }

    /// Persists `next`, then makes it the current list and notifies subscribers
    ///
    /// On failure the current list is left untouched.
    fn commit(&mut self, next: Vec<Snippet>) -> StoreResult<()> {
        self.config_manager.save_snippets(&next)?;
        self.snippets = next;
        self.publish();
        Ok(())
    }

    fn publish(&self) {
        self.publisher.send_replace(Arc::new(self.snippets.clone()));
    }

    /// Reloads snippets from storage and notifies subscribers
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.snippets = self.config_manager.load_snippets()?;
        self.publish();
        Ok(())
    }
}

impl SnippetStore for SnippetManager {
    fn snapshot(&self) -> Vec<Snippet> {
        self.snippets.clone()
    }

    fn subscribe(&self) -> SnippetFeed {
        Self::subscribe(self)
    }

    fn create(&mut self, draft: SnippetDraft, owner: &str) -> StoreResult<String> {
        self.create_snippet(draft, owner)
    }

    fn update(&mut self, id: &str, draft: SnippetDraft) -> StoreResult<()> {
        self.update_snippet(id, draft)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        self.delete_snippet(id)
    }
}
