//! Snippet storage module
//!
//! The snippet collection is owned by a store. Consumers never query it
//! directly for the dashboard; they subscribe to a feed that carries the
//! full list every time it changes, and re-run the filter on each event.
//!
//! `SnippetManager` is the file-backed store used by the CLI and tests.

mod feed;
mod manager;
pub mod tags;

pub use feed::{SnippetEvent, SnippetFeed};
pub use manager::SnippetManager;
pub use tags::TagList;

use crate::error::StoreResult;
use crate::models::{Snippet, SnippetDraft};

/// A collection of snippets that publishes changes
pub trait SnippetStore {
    /// Returns a copy of the current list
    fn snapshot(&self) -> Vec<Snippet>;

    /// Subscribes to "list replaced" events
    fn subscribe(&self) -> SnippetFeed;

    /// Validates and stores a new snippet owned by `owner`, returning its id
    ///
    /// # Errors
    ///
    /// Returns an error if validation or persistence fails.
    fn create(&mut self, draft: SnippetDraft, owner: &str) -> StoreResult<String>;

    /// Replaces the editable fields of an existing snippet
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown, validation fails or
    /// persistence fails.
    fn update(&mut self, id: &str, draft: SnippetDraft) -> StoreResult<()>;

    /// Removes a snippet
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown or persistence fails.
    fn delete(&mut self, id: &str) -> StoreResult<()>;
}
