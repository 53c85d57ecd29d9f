//! Editor session: the document, the template collection and the preferences
//! wired together the way the toolbar and sidebar drive them.
//!
//! Every document change is reported to the event emitter and handed to the
//! autosave worker. Template and preference changes persist immediately.

use crate::autosave::{AutosaveError, AutosaveHandle};
use crate::config::EditorConfig;
use crate::editor::{self, EditorError, EditorSurface, Selection, TextBuffer};
use crate::events::{
    DocChangedPayload, EditorEventEmitter, SelectionChangedPayload, ToastPayload,
};
use crate::paths;
use crate::snippets::{
    completion_candidates, Completion, CompletionCandidate, Expansion, SnippetError, SnippetStore,
    Template, TemplateDraft,
};
use crate::storage::{keys, FileStore, KeyValueStore, MemoryStore, StorageError};
use crate::util::date::note_file_name;
use crate::util::{Preferences, SettingsAccess, Theme};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Error types for session operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Snippet(#[from] SnippetError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Autosave(#[from] AutosaveError),
    /// The action must be confirmed by the user; carries the prompt
    #[error("{0}")]
    NeedsConfirmation(String),
    /// Saving a note requires some text
    #[error("Editor vazio")]
    EmptyDocument,
    #[error("I/O error: {0}")]
    Io(String),
}

/// Open the storage file from `config`, falling back to an in-memory store
/// when it cannot be resolved or read.
pub fn open_storage(config: &EditorConfig) -> Arc<dyn KeyValueStore> {
    let path = match config.storage_path.clone() {
        Some(path) => Ok(path),
        None => paths::get_storage_path(),
    };

    let opened = path
        .map_err(|e| e.to_string())
        .and_then(|path| FileStore::open(path).map_err(|e| e.to_string()));

    match opened {
        Ok(store) => {
            crate::debug!("Using storage file {:?}", store.path());
            Arc::new(store)
        }
        Err(e) => {
            crate::warn!("Storage unavailable, keeping data in memory only: {}", e);
            Arc::new(MemoryStore::new())
        }
    }
}

pub struct EditorSession {
    storage: Arc<dyn KeyValueStore>,
    snippets: SnippetStore,
    preferences: Preferences,
    buffer: TextBuffer,
    autosave: Option<AutosaveHandle>,
    emitter: Arc<dyn EditorEventEmitter>,
}

impl SettingsAccess for EditorSession {
    fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}

impl EditorSession {
    /// Load templates, preferences and the saved document, then start autosave.
    pub fn init(
        storage: Arc<dyn KeyValueStore>,
        emitter: Arc<dyn EditorEventEmitter>,
        config: &EditorConfig,
    ) -> Self {
        let mut snippets = SnippetStore::new(storage.clone());
        snippets.load();

        let saved = match storage.get(keys::CONTENT) {
            Ok(content) => content.unwrap_or_default(),
            Err(e) => {
                crate::warn!("Failed to read saved document, starting empty: {}", e);
                String::new()
            }
        };

        let autosave = AutosaveHandle::spawn(
            storage.clone(),
            keys::CONTENT,
            config.autosave_delay,
            emitter.clone(),
        );

        let mut session = Self {
            storage,
            snippets,
            preferences: Preferences::default(),
            buffer: TextBuffer::with_text(saved),
            autosave: Some(autosave),
            emitter,
        };
        session.preferences = Preferences::load(&session);
        crate::info!(
            "Session ready: {} templates, {} chars, theme {}",
            session.snippets.len(),
            session.buffer.char_count(),
            session.preferences.theme.as_str()
        );

        session.emit_doc_length();
        session.emit_selection();
        session
    }

    // ---- document -------------------------------------------------------

    pub fn content(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn selection(&self) -> Selection {
        self.buffer.selection()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn snippets(&self) -> &SnippetStore {
        &self.snippets
    }

    fn emit_doc_length(&self) {
        self.emitter.emit_doc_changed(DocChangedPayload {
            length: self.buffer.char_count(),
        });
    }

    fn emit_selection(&self) {
        self.emitter.emit_selection_changed(SelectionChangedPayload {
            line: self.buffer.line_at_caret(),
        });
    }

    fn toast(&self, message: impl Into<String>) {
        self.emitter.emit_toast(ToastPayload {
            message: message.into(),
        });
    }

    /// Report a document change and queue it for autosave
    fn document_changed(&self) {
        self.emit_doc_length();
        self.emit_selection();
        if let Some(autosave) = &self.autosave {
            if let Err(e) = autosave.schedule(self.buffer.text().to_string()) {
                crate::error!("Failed to schedule autosave: {}", e);
            }
        }
    }

    /// Replace the whole document, e.g. with an opened file
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.buffer.set_text(text);
        self.document_changed();
    }

    /// Read a text file into the editor
    pub fn open_file(&mut self, path: &Path) -> Result<(), SessionError> {
        let text = std::fs::read_to_string(path).map_err(|e| SessionError::Io(e.to_string()))?;
        self.set_content(text);
        self.toast("Arquivo aberto com sucesso");
        Ok(())
    }

    /// Replace `from..to` with `insert`
    pub fn apply_edit(&mut self, from: usize, to: usize, insert: &str) -> Result<(), SessionError> {
        self.buffer.replace_range(from, to, insert)?;
        self.document_changed();
        Ok(())
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<(), SessionError> {
        self.buffer.set_selection(selection)?;
        self.emit_selection();
        Ok(())
    }

    /// Empty the document once `confirmed`; the empty text is autosaved
    pub fn clear(&mut self, confirmed: bool) -> Result<(), SessionError> {
        if !confirmed {
            return Err(SessionError::NeedsConfirmation(
                "Deseja limpar todo o editor?".to_string(),
            ));
        }
        self.set_content(String::new());
        Ok(())
    }

    /// Empty the document and forget the saved copy
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if let Some(autosave) = &self.autosave {
            autosave.cancel()?;
        }
        self.buffer.set_text(String::new());
        self.emit_doc_length();
        self.emit_selection();
        self.storage.remove(keys::CONTENT)?;
        crate::info!("Document reset");
        Ok(())
    }

    // ---- completion and expansion --------------------------------------

    /// Completion for the word before the caret.
    ///
    /// Without `explicit`, nothing is offered unless a word is being typed.
    pub fn complete(&self, explicit: bool) -> Option<Completion> {
        let caret = self.buffer.selection().head;
        completion_candidates(self.snippets.list(), &self.buffer.text()[..caret], explicit)
    }

    /// Replace the typed word starting at `from` with `candidate`'s body
    pub fn accept_candidate(
        &mut self,
        from: usize,
        candidate: &CompletionCandidate,
    ) -> Result<Expansion, SessionError> {
        let caret = self.buffer.selection().head;
        self.buffer.set_selection(Selection::range(from.min(caret), caret))?;
        let expansion = crate::snippets::expand(&mut self.buffer, &candidate.body)?;
        self.document_changed();
        Ok(expansion)
    }

    /// Insert the template at `index` over the selection
    pub fn insert_template(&mut self, index: usize) -> Result<Expansion, SessionError> {
        let template = self
            .snippets
            .get(index)
            .cloned()
            .ok_or(SnippetError::IndexOutOfRange {
                index,
                len: self.snippets.len(),
            })?;
        let expansion = crate::snippets::expand(&mut self.buffer, &template.body)?;
        self.document_changed();
        self.toast(format!("Modelo \"{}\" inserido", template.name));
        Ok(expansion)
    }

    /// Move to the next placeholder field; false when no field session is active
    pub fn next_field(&mut self) -> bool {
        let moved = self.buffer.next_field();
        if moved {
            self.emit_selection();
        }
        moved
    }

    pub fn prev_field(&mut self) -> bool {
        let moved = self.buffer.prev_field();
        if moved {
            self.emit_selection();
        }
        moved
    }

    // ---- editing commands ----------------------------------------------

    pub fn insert_date(&mut self, now: &NaiveDateTime) -> Result<(), SessionError> {
        editor::insert_date(&mut self.buffer, now)?;
        self.document_changed();
        Ok(())
    }

    /// Cycle the case of the selection, or of the whole document when nothing
    /// is selected. Returns whether the text changed.
    pub fn toggle_case(&mut self) -> Result<bool, SessionError> {
        let changed = editor::toggle_case(&mut self.buffer)?;
        if changed {
            self.document_changed();
        }
        Ok(changed)
    }

    // ---- templates ------------------------------------------------------

    /// Validate `draft` and append it. Returns the new template's index.
    ///
    /// A trigger already in use needs `confirmed`.
    pub fn add_template(
        &mut self,
        draft: TemplateDraft,
        confirmed: bool,
    ) -> Result<usize, SessionError> {
        let template = draft.validate()?;
        if !confirmed && self.snippets.find_trigger(&template.trigger).is_some() {
            return Err(SessionError::NeedsConfirmation(format!(
                "O atalho \"{}\" já existe. Duplicar?",
                template.trigger
            )));
        }
        self.snippets.add(template)?;
        self.toast("Modelo salvo!");
        Ok(self.snippets.len() - 1)
    }

    pub fn update_template(
        &mut self,
        index: usize,
        draft: TemplateDraft,
    ) -> Result<(), SessionError> {
        let template = draft.validate()?;
        self.snippets.update(index, template)?;
        self.toast("Modelo salvo!");
        Ok(())
    }

    /// Remove the template at `index` once `confirmed`.
    ///
    /// The index is checked before asking for confirmation.
    pub fn remove_template(
        &mut self,
        index: usize,
        confirmed: bool,
    ) -> Result<Template, SessionError> {
        if self.snippets.get(index).is_none() {
            return Err(SnippetError::IndexOutOfRange {
                index,
                len: self.snippets.len(),
            }
            .into());
        }
        if !confirmed {
            return Err(SessionError::NeedsConfirmation(
                "Excluir este modelo?".to_string(),
            ));
        }
        Ok(self.snippets.remove(index)?)
    }

    /// Replace every template with the JSON array in `json`.
    ///
    /// The payload is validated before asking for `confirmed`.
    pub fn import_templates(&mut self, json: &str, confirmed: bool) -> Result<usize, SessionError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| SnippetError::InvalidFormat(e.to_string()))?;
        if !value.is_array() {
            return Err(SnippetError::InvalidFormat("Formato deve ser um array.".to_string()).into());
        }
        if !confirmed {
            return Err(SessionError::NeedsConfirmation(
                "Isso substituirá seus modelos atuais. Continuar?".to_string(),
            ));
        }
        let count = self.snippets.import(value)?;
        self.toast("Importação concluída!");
        Ok(count)
    }

    pub fn import_templates_file(
        &mut self,
        path: &Path,
        confirmed: bool,
    ) -> Result<usize, SessionError> {
        let json = std::fs::read_to_string(path).map_err(|e| SessionError::Io(e.to_string()))?;
        self.import_templates(&json, confirmed)
    }

    pub fn export_templates(&self) -> String {
        self.snippets.export()
    }

    pub fn export_templates_file(&self, path: &Path) -> Result<(), SessionError> {
        std::fs::write(path, self.snippets.export()).map_err(|e| SessionError::Io(e.to_string()))
    }

    // ---- notes ----------------------------------------------------------

    /// Write the document to `dir/evolucao_<date>.txt`
    pub fn save_note(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, SessionError> {
        if self.buffer.is_empty() {
            self.toast("Editor vazio");
            return Err(SessionError::EmptyDocument);
        }
        let path = dir.join(note_file_name(date));
        std::fs::write(&path, self.buffer.text()).map_err(|e| SessionError::Io(e.to_string()))?;
        crate::info!("Saved note to {:?}", path);
        Ok(path)
    }

    // ---- preferences ----------------------------------------------------

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), SessionError> {
        self.preferences.theme = theme;
        self.set_setting(keys::THEME, theme.as_str())?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, SessionError> {
        let theme = self.preferences.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn set_vim(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.preferences.vim_enabled = enabled;
        self.set_flag(keys::VIM, enabled)?;
        self.toast(if enabled {
            "Modo VIM Ativado"
        } else {
            "Modo Padrão Ativado"
        });
        Ok(())
    }

    pub fn set_sidebar(&mut self, open: bool) -> Result<(), SessionError> {
        self.preferences.sidebar_open = open;
        self.set_flag(keys::SIDEBAR, open)?;
        Ok(())
    }

    // ---- lifecycle ------------------------------------------------------

    /// Write any pending autosave now. Returns whether something was written.
    pub fn flush(&self) -> Result<bool, SessionError> {
        match &self.autosave {
            Some(autosave) => Ok(autosave.flush()?),
            None => Ok(false),
        }
    }

    /// Stop autosave, discarding any pending write
    pub fn dispose(&mut self) {
        if let Some(autosave) = self.autosave.take() {
            crate::debug!("Disposing session autosave");
            drop(autosave);
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
