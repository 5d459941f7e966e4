//! Application settings model
//!
//! This module defines the application-wide settings stored in config.toml.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterState, LanguageFilter, SortKey};

/// Application-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Owner id used when none is given explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Dashboard defaults
    #[serde(default)]
    pub dashboard: DashboardSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Initial dashboard criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Sort key applied when the dashboard opens
    #[serde(default)]
    pub default_sort: SortKey,
    /// Language dropdown value applied when the dashboard opens
    #[serde(default)]
    pub default_language: LanguageFilter,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_sort: SortKey::Newest,
            default_language: LanguageFilter::All,
        }
    }
}

impl DashboardSettings {
    /// Builds the filter state the dashboard starts with
    #[must_use]
    pub fn initial_filter(&self) -> FilterState {
        FilterState::new()
            .with_language(self.default_language.clone())
            .with_sort(self.default_sort)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default tracing directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
