//! Language catalogue
//!
//! The snippet form offers a fixed set of editor languages, while the
//! dashboard dropdown offers display names plus an `All` entry.

/// Languages the snippet editor supports, stored lowercase
pub const EDITOR_LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "jsx",
    "tsx",
    "python",
    "java",
    "cpp",
    "css",
    "html",
    "sql",
    "json",
    "markdown",
];

/// Language used for new snippets when none is chosen
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Options of the dashboard language dropdown
pub const FILTER_LANGUAGES: &[&str] = &[
    "All",
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "HTML",
    "CSS",
    "SQL",
    "JSON",
    "Markdown",
];

/// Returns true if the editor supports `language` (case-insensitive)
#[must_use]
pub fn is_editor_language(language: &str) -> bool {
    EDITOR_LANGUAGES
        .iter()
        .any(|l| l.eq_ignore_ascii_case(language))
}

/// Display name of an editor language: first character uppercased
#[must_use]
pub fn display_name(language: &str) -> String {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
