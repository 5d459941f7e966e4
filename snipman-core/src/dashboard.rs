//! Dashboard view model
//!
//! Holds the latest snippet list pushed by the store together with the
//! current [`FilterState`], and produces the list to render.

use std::sync::Arc;

use tracing::debug;

use crate::filter::{self, FilterState};
use crate::models::Snippet;
use crate::snippet::{SnippetEvent, SnippetFeed, SnippetStore};

/// Message shown when nothing matches
pub const EMPTY_MESSAGE: &str = "No snippets found. Create your first snippet to get started!";

/// State behind the snippet dashboard
#[derive(Debug, Clone)]
pub struct DashboardView {
    snippets: Arc<Vec<Snippet>>,
    filter: FilterState,
    loading: bool,
}

impl DashboardView {
    /// Creates a view that has not received any snippets yet
    #[must_use]
    pub fn new(filter: FilterState) -> Self {
        Self {
            snippets: Arc::default(),
            filter,
            loading: true,
        }
    }

    /// Creates a view primed with the current contents of `store`
    #[must_use]
    pub fn from_store<S: SnippetStore + ?Sized>(store: &S, filter: FilterState) -> Self {
        let mut view = Self::new(filter);
        view.on_event(SnippetEvent::ListReplaced(Arc::new(store.snapshot())));
        view
    }

    /// Applies an event from the store
    pub fn on_event(&mut self, event: SnippetEvent) {
        match event {
            SnippetEvent::ListReplaced(list) => {
                debug!(count = list.len(), "Snippet list replaced");
                self.snippets = list;
                self.loading = false;
            }
        }
    }

    /// Returns a view with a different filter state
    #[must_use]
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the current filter state
    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Returns true until the first list has arrived
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns every snippet the store pushed, unfiltered
    #[must_use]
    pub fn all(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Returns the snippets to render, filtered and sorted
    #[must_use]
    pub fn visible(&self) -> Vec<Snippet> {
        filter::apply(&self.snippets, &self.filter)
    }

    /// Returns the placeholder text when loaded and nothing is visible
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.loading && filter::view(&self.snippets, &self.filter).is_empty() {
            Some(EMPTY_MESSAGE)
        } else {
            None
        }
    }

    /// Follows a feed until it closes, reporting the visible list after each event
    ///
    /// Returns the final view.
    pub async fn follow<F>(mut self, mut feed: SnippetFeed, mut on_update: F) -> Self
    where
        F: FnMut(&[Snippet]),
    {
        while let Some(event) = feed.next_event().await {
            self.on_event(event);
            on_update(&self.visible());
        }
        self
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}
