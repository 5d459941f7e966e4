//! Change feed for the snippet list

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::Snippet;

/// An update pushed by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetEvent {
    /// The whole list was replaced
    ListReplaced(Arc<Vec<Snippet>>),
}

impl SnippetEvent {
    /// Returns the snippets carried by this event
    #[must_use]
    pub fn snippets(&self) -> &[Snippet] {
        match self {
            Self::ListReplaced(list) => list,
        }
    }
}

/// Receiving side of a store's change feed
///
/// Only the latest list is kept; a slow consumer skips intermediate states.
#[derive(Debug, Clone)]
pub struct SnippetFeed {
    rx: watch::Receiver<Arc<Vec<Snippet>>>,
    owner: Option<String>,
    primed: bool,
}

impl SnippetFeed {
    pub(crate) fn new(rx: watch::Receiver<Arc<Vec<Snippet>>>) -> Self {
        Self {
            rx,
            owner: None,
            primed: false,
        }
    }

    /// Restricts events to snippets owned by `owner`
    #[must_use]
    pub fn for_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Waits for the next event
    ///
    /// The first call yields the current list immediately. Returns `None`
    /// once the store has been dropped.
    pub async fn next_event(&mut self) -> Option<SnippetEvent> {
        if self.primed {
            self.rx.changed().await.ok()?;
        } else {
            self.primed = true;
        }
        let list = self.rx.borrow_and_update().clone();
        Some(SnippetEvent::ListReplaced(self.scope(list)))
    }

    fn scope(&self, list: Arc<Vec<Snippet>>) -> Arc<Vec<Snippet>> {
        match &self.owner {
            None => list,
            Some(owner) => Arc::new(
                list.iter()
                    .filter(|s| &s.user_id == owner)
                    .cloned()
                    .collect(),
            ),
        }
    }
}
