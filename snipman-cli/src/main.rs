//! SnipMan CLI - Command-line interface for the SnipMan snippet manager
//!
//! Provides commands for listing, searching, adding, editing, and deleting
//! snippets in the local snippet store.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use snipman_core::config::{AppSettings, ConfigManager};
use snipman_core::models::language::{self, EDITOR_LANGUAGES, FILTER_LANGUAGES};
use snipman_core::{
    DashboardView, FilterState, LanguageFilter, Snippet, SnippetDraft, SnippetEvent,
    SnippetManager, SortKey, StoreError, TagList,
};
use tracing::debug;

/// Owner id used when neither the command line nor the settings name one
const LOCAL_OWNER: &str = "local";

/// SnipMan command-line interface for managing code snippets
#[derive(Parser)]
#[command(name = "snipman")]
#[command(author, version, about = "SnipMan command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding snippets.toml and config.toml
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List snippets
    #[command(about = "List snippets with dashboard filters")]
    List {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,

        /// Language filter ("All" or a language, case-insensitive)
        #[arg(short, long)]
        language: Option<String>,

        /// Selected language (repeatable, exact match)
        #[arg(long = "select")]
        select: Vec<String>,

        /// Search text matched against titles and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort key: newest, oldest, name, name-desc
        #[arg(long)]
        sort: Option<String>,

        /// List this user's snippets instead of the configured owner's
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Show snippet details
    #[command(about = "Show a snippet and its code")]
    Show {
        /// Snippet title or ID
        name: String,
    },

    /// Add a new snippet
    #[command(about = "Add a new snippet")]
    Add {
        /// Snippet title
        #[arg(short, long)]
        title: String,

        /// Language identifier
        #[arg(short, long, default_value = language::DEFAULT_LANGUAGE)]
        language: String,

        /// Code body
        #[arg(short, long, conflicts_with = "file")]
        code: Option<String>,

        /// Read the code body from a file
        #[arg(short = 'F', long)]
        file: Option<PathBuf>,

        /// Comma-separated tags
        #[arg(short = 'T', long)]
        tags: Option<String>,

        /// Owner of the new snippet
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Edit an existing snippet
    #[command(about = "Edit an existing snippet")]
    Edit {
        /// Snippet title or ID
        name: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New language
        #[arg(short, long)]
        language: Option<String>,

        /// New code body
        #[arg(short, long, conflicts_with = "file")]
        code: Option<String>,

        /// Read the new code body from a file
        #[arg(short = 'F', long)]
        file: Option<PathBuf>,

        /// Replace tags with this comma-separated list
        #[arg(short = 'T', long)]
        tags: Option<String>,
    },

    /// Delete a snippet
    #[command(about = "Delete a snippet")]
    Delete {
        /// Snippet title or ID
        name: String,
    },

    /// List languages
    #[command(about = "List editor languages and languages in use")]
    Languages,

    /// List tags
    #[command(about = "List tags in use")]
    Tags,
}

/// Output format for the list command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
    /// Output as CSV
    Csv,
}

/// Exit codes for CLI operations
pub mod exit_codes {
    /// Success - operation completed successfully
    pub const SUCCESS: i32 = 0;
    /// General error - configuration, validation, or I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// The named snippet does not exist
    pub const NOT_FOUND: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snippet not found
    #[error("Snippet not found: {0}")]
    NotFound(String),

    /// Snippet error
    #[error("Snippet error: {0}")]
    Snippet(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => exit_codes::NOT_FOUND,
            Self::Config(_) | Self::Snippet(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Snippet(other.to_string()),
        }
    }
}

/// Loaded configuration and store for one command
struct Context {
    settings: AppSettings,
    store: SnippetManager,
}

/// Resolves the configuration directory and reads the settings
fn load_settings(config_dir: Option<&str>) -> Result<(ConfigManager, AppSettings), CliError> {
    let config_manager = match config_dir {
        Some(dir) => {
            ConfigManager::with_config_dir(PathBuf::from(shellexpand::tilde(dir).into_owned()))
        }
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}")))?,
    };

    let settings = config_manager
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))?;

    Ok((config_manager, settings))
}

impl Context {
    /// Opens the snippet store
    ///
    /// Call after logging is set up; loading may warn about the file.
    fn open(config_manager: ConfigManager, settings: AppSettings) -> Result<Self, CliError> {
        let store = SnippetManager::new(config_manager)
            .map_err(|e| CliError::Snippet(format!("Failed to load snippets: {e}")))?;

        Ok(Self { settings, store })
    }

    fn owner(&self, explicit: Option<String>) -> String {
        explicit
            .or_else(|| self.settings.owner.clone())
            .unwrap_or_else(|| LOCAL_OWNER.to_string())
    }
}

fn main() {
    let cli = Cli::parse();

    let result = load_settings(cli.config_dir.as_deref()).and_then(|(config_manager, settings)| {
        snipman_core::logging::init(&settings.logging.level, cli.verbose);
        let mut ctx = Context::open(config_manager, settings)?;
        run(&mut ctx, cli.command)
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(ctx: &mut Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::List {
            format,
            language,
            select,
            search,
            sort,
            owner,
        } => {
            let state = list_filter(
                &ctx.settings,
                language.as_deref(),
                select,
                search,
                sort.as_deref(),
            );
            let owner = ctx.owner(owner);
            cmd_list(ctx, state, &owner, format)
        }
        Commands::Show { name } => cmd_show(ctx, &name),
        Commands::Add {
            title,
            language,
            code,
            file,
            tags,
            owner,
        } => {
            let code = read_code(code, file.as_deref())?.unwrap_or_default();
            let tags = tags.map(|t| TagList::parse_csv(&t).into_vec()).unwrap_or_default();
            let owner = ctx.owner(owner);
            cmd_add(ctx, SnippetDraft::new(title, language, code).with_tags(tags), &owner)
        }
        Commands::Edit {
            name,
            title,
            language,
            code,
            file,
            tags,
        } => {
            let code = read_code(code, file.as_deref())?;
            cmd_edit(ctx, &name, title, language, code, tags.as_deref())
        }
        Commands::Delete { name } => cmd_delete(ctx, &name),
        Commands::Languages => {
            cmd_languages(ctx);
            Ok(())
        }
        Commands::Tags => {
            cmd_tags(ctx);
            Ok(())
        }
    }
}

/// Builds the filter state for `list`, starting from the configured defaults
fn list_filter(
    settings: &AppSettings,
    language: Option<&str>,
    select: Vec<String>,
    search: String,
    sort: Option<&str>,
) -> FilterState {
    let mut state = settings
        .dashboard
        .initial_filter()
        .with_selected_languages(select)
        .with_query(search);
    if let Some(language) = language {
        state = state.with_language(LanguageFilter::parse(language));
    }
    if let Some(sort) = sort {
        state = state.with_sort(SortKey::parse(sort));
    }
    state
}

fn read_code(code: Option<String>, file: Option<&Path>) -> Result<Option<String>, CliError> {
    match (code, file) {
        (Some(code), _) => Ok(Some(code)),
        (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
        (None, None) => Ok(None),
    }
}

/// List snippets command handler
fn cmd_list(
    ctx: &Context,
    state: FilterState,
    owner: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let sort = state.sort;
    let visible = owner_view(&ctx.store, state, owner).visible();
    debug!(%owner, visible = visible.len(), "Listing snippets");

    match format {
        OutputFormat::Table => {
            println!("{}", format_table(&visible));
            if !visible.is_empty() {
                println!("\n{} snippet(s), {}", visible.len(), sort.label());
            }
        }
        OutputFormat::Json => print_json(&visible)?,
        OutputFormat::Csv => print!("{}", format_csv(&visible)),
    }

    Ok(())
}

/// Dashboard view over the snippets belonging to `owner`
fn owner_view(store: &SnippetManager, state: FilterState, owner: &str) -> DashboardView {
    let owned: Vec<Snippet> = store.list_for_owner(owner).into_iter().cloned().collect();
    let mut view = DashboardView::new(state);
    view.on_event(SnippetEvent::ListReplaced(Arc::new(owned)));
    view
}

/// Format snippets as a table string
#[must_use]
pub fn format_table(snippets: &[Snippet]) -> String {
    if snippets.is_empty() {
        return snipman_core::dashboard::EMPTY_MESSAGE.to_string();
    }

    let mut output = String::new();

    let title_width = snippets
        .iter()
        .map(|s| s.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);
    let lang_width = snippets
        .iter()
        .map(|s| s.language.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);
    let created_width = 19;

    let _ = writeln!(
        output,
        "{:<title_width$}  {:<lang_width$}  {:<created_width$}  TAGS",
        "TITLE", "LANGUAGE", "CREATED"
    );
    let _ = writeln!(
        output,
        "{:-<title_width$}  {:-<lang_width$}  {:-<created_width$}  {:-<4}",
        "", "", "", ""
    );

    for snippet in snippets {
        let _ = writeln!(
            output,
            "{:<title_width$}  {:<lang_width$}  {:<created_width$}  {}",
            snippet.title,
            snippet.language,
            snippet.created_at.to_string(),
            snippet.tags.join(", ")
        );
    }

    output.trim_end().to_string()
}

/// Print snippets as JSON
fn print_json(snippets: &[Snippet]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(snippets)
        .map_err(|e| CliError::Snippet(format!("Failed to serialize: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Format snippets as CSV
#[must_use]
pub fn format_csv(snippets: &[Snippet]) -> String {
    let mut output = String::from("id,title,language,created_at,tags\n");
    for snippet in snippets {
        let _ = writeln!(
            output,
            "{},{},{},{},{}",
            escape_csv_field(&snippet.id),
            escape_csv_field(&snippet.title),
            escape_csv_field(&snippet.language),
            snippet.created_at.seconds,
            escape_csv_field(&snippet.tags.join(";"))
        );
    }
    output
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Show snippet details
fn cmd_show(ctx: &Context, name: &str) -> Result<(), CliError> {
    let snippet = find_snippet(&ctx.store, name)?;

    println!("Snippet Details:");
    println!("  ID:       {}", snippet.id);
    println!("  Title:    {}", snippet.title);
    println!("  Language: {}", snippet.language);
    println!("  Created:  {}", snippet.created_at);
    if !snippet.user_id.is_empty() {
        println!("  Owner:    {}", snippet.user_id);
    }
    if !snippet.tags.is_empty() {
        println!("  Tags:     {}", snippet.tags.join(", "));
    }
    println!("\n{}", snippet.code);

    Ok(())
}

/// Add a new snippet
fn cmd_add(ctx: &mut Context, draft: SnippetDraft, owner: &str) -> Result<(), CliError> {
    if !language::is_editor_language(&draft.language) {
        eprintln!(
            "Warning: '{}' is not one of the editor languages ({})",
            draft.language,
            EDITOR_LANGUAGES.join(", ")
        );
    }

    let title = draft.title.clone();
    let id = ctx.store.create_snippet(draft, owner)?;

    println!("Created snippet '{title}' with ID {id}");
    Ok(())
}

/// Edit a snippet, keeping fields that were not given
fn cmd_edit(
    ctx: &mut Context,
    name: &str,
    title: Option<String>,
    language: Option<String>,
    code: Option<String>,
    tags: Option<&str>,
) -> Result<(), CliError> {
    let snippet = find_snippet(&ctx.store, name)?;
    let id = snippet.id.clone();

    let mut draft = SnippetDraft::from(snippet);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(language) = language {
        draft.language = language;
    }
    if let Some(code) = code {
        draft.code = code;
    }
    if let Some(tags) = tags {
        draft.tags = TagList::parse_csv(tags).into_vec();
    }

    ctx.store.update_snippet(&id, draft)?;
    println!("Updated snippet {id}");
    Ok(())
}

/// Delete a snippet
fn cmd_delete(ctx: &mut Context, name: &str) -> Result<(), CliError> {
    let snippet = find_snippet(&ctx.store, name)?;
    let id = snippet.id.clone();
    let title = snippet.title.clone();

    ctx.store.delete_snippet(&id)?;

    println!("Deleted snippet '{title}' (ID: {id})");
    Ok(())
}

fn cmd_languages(ctx: &Context) {
    println!("Editor languages:");
    for lang in EDITOR_LANGUAGES {
        println!("  {:<12} {}", lang, language::display_name(lang));
    }

    println!("\nDashboard filter: {}", FILTER_LANGUAGES.join(", "));

    let in_use = ctx.store.all_languages();
    if !in_use.is_empty() {
        println!("\nIn use:");
        for lang in in_use {
            println!("  {lang}");
        }
    }
}

fn cmd_tags(ctx: &Context) {
    let tags = ctx.store.all_tags();
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }
    for tag in tags {
        println!("{tag}");
    }
}

/// Finds a snippet by ID or title
///
/// Titles are matched case-insensitively and must be unambiguous.
fn find_snippet<'a>(store: &'a SnippetManager, name_or_id: &str) -> Result<&'a Snippet, CliError> {
    if let Some(snippet) = store.get_snippet(name_or_id) {
        return Ok(snippet);
    }

    let needle = name_or_id.to_lowercase();
    let matches: Vec<&Snippet> = store
        .list_snippets()
        .iter()
        .filter(|s| s.title.to_lowercase() == needle)
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::NotFound(name_or_id.to_string())),
        [snippet] => Ok(snippet),
        _ => Err(CliError::Snippet(format!(
            "Ambiguous snippet title: {name_or_id}"
        ))),
    }
}
