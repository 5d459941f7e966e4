//! Core data models for SnipMan
//!
//! This module defines the snippet record, its timestamp, the editable
//! draft submitted by the snippet form, and the language catalogue.

pub mod language;
mod snippet;

pub use snippet::{Snippet, SnippetDraft, Timestamp};
