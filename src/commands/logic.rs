// Command implementation logic - testable functions separate from the CLI wrappers

use crate::editor::{filter_candidates, Selection};
use crate::session::{EditorSession, SessionError};
use crate::snippets::{Expansion, SnippetError, TemplateDraft};
use crate::util::{SettingsAccess, Theme};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

/// Map SessionError to user-friendly error messages
fn to_user_error(error: SessionError) -> String {
    match error {
        SessionError::Snippet(SnippetError::IndexOutOfRange { index, len }) => {
            format!("Nenhum modelo na posição {} ({} modelos)", index, len)
        }
        SessionError::Snippet(SnippetError::EmptyField(_)) => "Preencha Nome e Atalho.".to_string(),
        SessionError::Snippet(SnippetError::InvalidFormat(msg)) => format!("Erro JSON: {}", msg),
        SessionError::Snippet(SnippetError::StorageUnavailable(e)) => {
            format!("Alteração mantida apenas na memória, falha ao salvar: {}", e)
        }
        SessionError::NeedsConfirmation(prompt) => {
            format!("{} Use --yes para confirmar.", prompt)
        }
        SessionError::Storage(e) => format!("Falha ao salvar: {}", e),
        SessionError::Editor(e) => format!("Erro no editor: {}", e),
        SessionError::Autosave(e) => format!("Falha no salvamento automático: {}", e),
        SessionError::EmptyDocument => "Editor vazio".to_string(),
        SessionError::Io(msg) => format!("Erro ao acessar o arquivo: {}", msg),
    }
}

/// Describe an expansion for the user
fn describe_expansion(expansion: Expansion) -> String {
    match expansion {
        Expansion::Fields { count } => format!("Modelo inserido com {} campos", count),
        Expansion::Plain => "Modelo inserido".to_string(),
        Expansion::Literal => "Modelo inserido como texto simples".to_string(),
    }
}

/// Put the caret at the end of the note, where command-line edits apply
fn move_to_end(session: &mut EditorSession) -> Result<(), String> {
    let end = session.content().len();
    session
        .set_selection(Selection::cursor(end))
        .map_err(to_user_error)
}

/// Numbered list of templates, one per line
pub fn list_snippets_impl(session: &EditorSession) -> String {
    let templates = session.snippets().list();
    if templates.is_empty() {
        return "Nenhum modelo. Crie o primeiro!".to_string();
    }
    templates
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}\t{}\t{}", i, t.trigger, t.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Implementation of snippets add
pub fn add_snippet_impl(
    session: &mut EditorSession,
    draft: TemplateDraft,
    confirmed: bool,
) -> Result<String, String> {
    let index = session
        .add_template(draft, confirmed)
        .map_err(to_user_error)?;
    let template = session
        .snippets()
        .get(index)
        .ok_or_else(|| "Modelo não encontrado após salvar".to_string())?;
    Ok(format!("Modelo salvo na posição {}: {} ({})", index, template.name, template.trigger))
}

pub fn update_snippet_impl(
    session: &mut EditorSession,
    index: usize,
    draft: TemplateDraft,
) -> Result<String, String> {
    session
        .update_template(index, draft)
        .map_err(to_user_error)?;
    Ok(format!("Modelo {} atualizado", index))
}

pub fn remove_snippet_impl(
    session: &mut EditorSession,
    index: usize,
    confirmed: bool,
) -> Result<String, String> {
    let removed = session
        .remove_template(index, confirmed)
        .map_err(to_user_error)?;
    Ok(format!("Modelo \"{}\" excluído", removed.name))
}

/// Export the templates as JSON, to `output` when given, otherwise as the returned text
pub fn export_snippets_impl(
    session: &EditorSession,
    output: Option<&Path>,
) -> Result<String, String> {
    match output {
        Some(path) => {
            session
                .export_templates_file(path)
                .map_err(to_user_error)?;
            Ok(format!(
                "{} modelos exportados para {}",
                session.snippets().len(),
                path.display()
            ))
        }
        None => Ok(session.export_templates()),
    }
}

pub fn import_snippets_impl(
    session: &mut EditorSession,
    path: &Path,
    confirmed: bool,
) -> Result<String, String> {
    let count = session
        .import_templates_file(path, confirmed)
        .map_err(to_user_error)?;
    Ok(format!("{} modelos importados", count))
}

/// Current note text
pub fn show_note_impl(session: &EditorSession) -> String {
    session.content().to_string()
}

/// Note length and caret line, as shown in the status bar
pub fn note_status_impl(session: &EditorSession) -> String {
    format!(
        "{} caracteres | Ln {}",
        session.buffer().char_count(),
        session.buffer().line_at_caret()
    )
}

pub fn open_note_impl(session: &mut EditorSession, path: &Path) -> Result<String, String> {
    session.open_file(path).map_err(to_user_error)?;
    Ok(note_status_impl(session))
}

/// Append `text` at the end of the note
pub fn append_note_impl(session: &mut EditorSession, text: &str) -> Result<String, String> {
    move_to_end(session)?;
    let end = session.content().len();
    session.apply_edit(end, end, text).map_err(to_user_error)?;
    Ok(note_status_impl(session))
}

/// Insert the template at `index` at the end of the note
pub fn insert_snippet_impl(session: &mut EditorSession, index: usize) -> Result<String, String> {
    move_to_end(session)?;
    let expansion = session.insert_template(index).map_err(to_user_error)?;
    Ok(describe_expansion(expansion))
}

/// Complete the word at the end of the note with the template whose trigger is `trigger`
pub fn expand_trigger_impl(session: &mut EditorSession, trigger: &str) -> Result<String, String> {
    move_to_end(session)?;
    let completion = session
        .complete(true)
        .ok_or_else(|| "Nada para completar".to_string())?;
    let candidate = completion
        .candidates
        .iter()
        .find(|c| c.trigger == trigger)
        .ok_or_else(|| format!("Nenhum modelo com o atalho \"{}\"", trigger))?;
    let expansion = session
        .accept_candidate(completion.from, candidate)
        .map_err(to_user_error)?;
    Ok(describe_expansion(expansion))
}

/// Candidates for the word at the end of the note, best match first
pub fn complete_impl(session: &mut EditorSession, explicit: bool) -> Result<String, String> {
    move_to_end(session)?;
    let Some(completion) = session.complete(explicit) else {
        return Ok(String::new());
    };
    let ranked = filter_candidates(&completion.typed, &completion.candidates);
    Ok(ranked
        .iter()
        .map(|c| format!("{}\t{}", c.trigger, c.display_name))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn insert_date_impl(session: &mut EditorSession, now: &NaiveDateTime) -> Result<String, String> {
    move_to_end(session)?;
    session.insert_date(now).map_err(to_user_error)?;
    Ok(note_status_impl(session))
}

pub fn toggle_case_impl(session: &mut EditorSession) -> Result<String, String> {
    move_to_end(session)?;
    let changed = session.toggle_case().map_err(to_user_error)?;
    Ok(if changed {
        note_status_impl(session)
    } else {
        "Nada para alterar".to_string()
    })
}

pub fn clear_note_impl(session: &mut EditorSession, confirmed: bool) -> Result<String, String> {
    session.clear(confirmed).map_err(to_user_error)?;
    Ok(note_status_impl(session))
}

pub fn reset_note_impl(session: &mut EditorSession) -> Result<String, String> {
    session.reset().map_err(to_user_error)?;
    Ok("Nota reiniciada".to_string())
}

pub fn save_note_impl(
    session: &EditorSession,
    dir: &Path,
    date: NaiveDate,
) -> Result<String, String> {
    let path = session.save_note(dir, date).map_err(to_user_error)?;
    Ok(format!("Salvo em {}", path.display()))
}

pub fn show_prefs_impl(session: &EditorSession) -> String {
    let prefs = session.preferences();
    format!(
        "theme\t{}\nvim\t{}\nsidebar\t{}",
        prefs.theme.as_str(),
        prefs.vim_enabled,
        prefs.sidebar_open
    )
}

/// Set the theme, or toggle it when `theme` is None
pub fn set_theme_impl(session: &mut EditorSession, theme: Option<Theme>) -> Result<String, String> {
    let theme = match theme {
        Some(theme) => {
            session.set_theme(theme).map_err(to_user_error)?;
            theme
        }
        None => session.toggle_theme().map_err(to_user_error)?,
    };
    Ok(format!("theme\t{}", theme.as_str()))
}

pub fn set_vim_impl(session: &mut EditorSession, enabled: bool) -> Result<String, String> {
    session.set_vim(enabled).map_err(to_user_error)?;
    Ok(format!("vim\t{}", session.get_flag(crate::storage::keys::VIM)))
}

pub fn set_sidebar_impl(session: &mut EditorSession, open: bool) -> Result<String, String> {
    session.set_sidebar(open).map_err(to_user_error)?;
    Ok(format!("sidebar\t{}", open))
}

/// Write pending note changes before the process exits
pub fn flush_impl(session: &EditorSession) -> Result<(), String> {
    session.flush().map(|_| ()).map_err(to_user_error)
}

#[cfg(test)]
#[path = "logic_test.rs"]
mod tests;
