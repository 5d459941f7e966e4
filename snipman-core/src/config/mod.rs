//! Configuration management for SnipMan
//!
//! This module provides the `ConfigManager` for loading and saving
//! snippets and settings in TOML format.

mod manager;
pub mod settings;

pub use manager::ConfigManager;
pub use settings::{AppSettings, DashboardSettings, LoggingSettings};
