// Command-line interface
// This file contains clap wrappers and is excluded from coverage.
// The actual logic is in logic.rs which is fully tested.
#![cfg_attr(coverage_nightly, coverage(off))]

pub mod logic;

use logic::{
    add_snippet_impl, append_note_impl, clear_note_impl, complete_impl, expand_trigger_impl,
    export_snippets_impl, flush_impl, import_snippets_impl, insert_date_impl,
    insert_snippet_impl, list_snippets_impl, note_status_impl, open_note_impl,
    remove_snippet_impl, reset_note_impl, save_note_impl, set_sidebar_impl, set_theme_impl,
    set_vim_impl, show_note_impl, show_prefs_impl, toggle_case_impl, update_snippet_impl,
};

use crate::config::EditorConfig;
use crate::events::LogEventEmitter;
use crate::paths::STORAGE_FILE;
use crate::session::{open_storage, EditorSession};
use crate::snippets::TemplateDraft;
use crate::util::Theme;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "med-editor")]
#[command(
    author,
    version,
    about = "Clinical note editor with snippet templates"
)]
pub struct Cli {
    /// Directory holding storage.json (defaults to $MED_EDITOR_DATA_DIR or the user data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage snippet templates
    Snippets {
        #[command(subcommand)]
        action: SnippetCommand,
    },
    /// Edit the saved note
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsCommand>,
    },
    /// List completion candidates for the word at the end of the note
    Complete {
        /// Offer every template even when no word is being typed
        #[arg(long)]
        explicit: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SnippetCommand {
    /// List templates with their positions
    List,
    /// Add a template
    Add {
        name: String,
        trigger: String,
        /// Body; may contain ${1:default} fields
        body: String,
        /// Add even when the trigger is already used
        #[arg(long)]
        yes: bool,
    },
    /// Replace the template at a position
    Update {
        index: usize,
        name: String,
        trigger: String,
        body: String,
    },
    /// Remove the template at a position
    Remove {
        index: usize,
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },
    /// Print the templates as JSON, or write them to a file
    Export { output: Option<PathBuf> },
    /// Replace all templates with a JSON file
    Import {
        file: PathBuf,
        /// Confirm replacing the current templates
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Print the note
    Show,
    /// Print length and caret line
    Status,
    /// Replace the note with a text file
    Open { file: PathBuf },
    /// Append text at the end
    Append { text: String },
    /// Insert the template at a position at the end
    Insert { index: usize },
    /// Complete the word at the end with the template using this trigger
    Expand { trigger: String },
    /// Append a date stamp
    Date,
    /// Cycle the case of the whole note
    ToggleCase,
    /// Empty the note
    Clear {
        /// Confirm clearing the whole note
        #[arg(long)]
        yes: bool,
    },
    /// Empty the note and forget the saved copy
    Reset,
    /// Write the note to evolucao_<date>.txt
    Save {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Set the theme, or toggle it when omitted
    Theme { theme: Option<Theme> },
    /// Enable or disable vim mode
    Vim {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    /// Open or close the template sidebar
    Sidebar {
        #[arg(action = ArgAction::Set)]
        open: bool,
    },
}

fn draft(name: String, trigger: String, body: String) -> TemplateDraft {
    TemplateDraft {
        name,
        trigger,
        body,
    }
}

fn run_snippets(session: &mut EditorSession, action: SnippetCommand) -> Result<String, String> {
    match action {
        SnippetCommand::List => Ok(list_snippets_impl(session)),
        SnippetCommand::Add {
            name,
            trigger,
            body,
            yes,
        } => add_snippet_impl(session, draft(name, trigger, body), yes),
        SnippetCommand::Update {
            index,
            name,
            trigger,
            body,
        } => update_snippet_impl(session, index, draft(name, trigger, body)),
        SnippetCommand::Remove { index, yes } => remove_snippet_impl(session, index, yes),
        SnippetCommand::Export { output } => export_snippets_impl(session, output.as_deref()),
        SnippetCommand::Import { file, yes } => import_snippets_impl(session, &file, yes),
    }
}

fn run_note(session: &mut EditorSession, action: NoteCommand) -> Result<String, String> {
    match action {
        NoteCommand::Show => Ok(show_note_impl(session)),
        NoteCommand::Status => Ok(note_status_impl(session)),
        NoteCommand::Open { file } => open_note_impl(session, &file),
        NoteCommand::Append { text } => append_note_impl(session, &text),
        NoteCommand::Insert { index } => insert_snippet_impl(session, index),
        NoteCommand::Expand { trigger } => expand_trigger_impl(session, &trigger),
        NoteCommand::Date => insert_date_impl(session, &chrono::Local::now().naive_local()),
        NoteCommand::ToggleCase => toggle_case_impl(session),
        NoteCommand::Clear { yes } => clear_note_impl(session, yes),
        NoteCommand::Reset => reset_note_impl(session),
        NoteCommand::Save { dir } => save_note_impl(session, &dir, chrono::Utc::now().date_naive()),
    }
}

fn run_prefs(session: &mut EditorSession, action: Option<PrefsCommand>) -> Result<String, String> {
    match action {
        None => Ok(show_prefs_impl(session)),
        Some(PrefsCommand::Theme { theme }) => set_theme_impl(session, theme),
        Some(PrefsCommand::Vim { enabled }) => set_vim_impl(session, enabled),
        Some(PrefsCommand::Sidebar { open }) => set_sidebar_impl(session, open),
    }
}

/// Open the session described by `cli`, run its command and persist the note
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = EditorConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_storage_path(dir.join(STORAGE_FILE));
    }

    let storage = open_storage(&config);
    let mut session = EditorSession::init(storage, Arc::new(LogEventEmitter), &config);

    let result = match cli.command {
        Commands::Snippets { action } => run_snippets(&mut session, action),
        Commands::Note { action } => run_note(&mut session, action),
        Commands::Prefs { action } => run_prefs(&mut session, action),
        Commands::Complete { explicit } => complete_impl(&mut session, explicit),
    };

    flush_impl(&session).map_err(anyhow::Error::msg)?;
    let output = result.map_err(anyhow::Error::msg)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
