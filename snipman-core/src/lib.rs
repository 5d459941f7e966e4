//! SnipMan Core Library
//!
//! This crate provides the core functionality for the SnipMan snippet manager:
//! the snippet model, dashboard filtering and sorting, a file-backed snippet
//! store with a change feed, form validation, and configuration.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod snippet;
pub mod validation;

pub use config::{AppSettings, ConfigManager};
pub use dashboard::DashboardView;
pub use error::{
    ConfigError, ConfigResult, FieldError, StoreError, StoreResult, ValidationErrors,
};
pub use filter::{apply, filter_snippets, sort_snippets, FilterState, LanguageFilter, SortKey};
pub use models::{Snippet, SnippetDraft, Timestamp};
pub use snippet::{SnippetEvent, SnippetFeed, SnippetManager, SnippetStore, TagList};
pub use validation::{ContactForm, SignInForm, SignUpForm};
