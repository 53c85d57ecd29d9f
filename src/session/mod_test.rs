use super::*;
use crate::events::tests::MockEventEmitter;
use crate::events::SaveStatus;
use crate::storage::MemoryStore;
use std::time::Duration;
use tempfile::TempDir;

const PRESSURE_JSON: &str = r#"[{"name":"Pressão","trigger":"pa","content":"PA ${1:120x80} mmHg"}]"#;

fn config(delay_ms: u64) -> EditorConfig {
    EditorConfig {
        autosave_delay: Duration::from_millis(delay_ms),
        storage_path: None,
    }
}

fn session_with(
    storage: Arc<MemoryStore>,
    delay_ms: u64,
) -> (EditorSession, Arc<MockEventEmitter>) {
    let emitter = Arc::new(MockEventEmitter::new());
    let session = EditorSession::init(storage, emitter.clone(), &config(delay_ms));
    (session, emitter)
}

/// Memory store whose writes take `write_time` to land
struct SlowStore {
    inner: MemoryStore,
    write_time: Duration,
}

impl KeyValueStore for SlowStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::thread::sleep(self.write_time);
        self.inner.set(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

fn pressure_store() -> Arc<MemoryStore> {
    let storage = Arc::new(MemoryStore::new());
    storage.set(keys::SNIPPETS, PRESSURE_JSON).unwrap();
    storage
}

fn draft(name: &str, trigger: &str, body: &str) -> TemplateDraft {
    TemplateDraft {
        name: name.to_string(),
        trigger: trigger.to_string(),
        body: body.to_string(),
    }
}

#[test]
fn test_init_on_empty_storage_uses_defaults() {
    let (session, emitter) = session_with(Arc::new(MemoryStore::new()), 30);

    assert_eq!(session.content(), "");
    assert_eq!(session.snippets().len(), 2);
    assert_eq!(*session.preferences(), Preferences::default());

    let docs = emitter.doc_changed_events.lock().unwrap();
    assert_eq!(docs.last().map(|p| p.length), Some(0));
}

#[test]
fn test_init_restores_document_and_preferences() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(keys::CONTENT, "Paciente estável").unwrap();
    storage.set(keys::THEME, "dark").unwrap();
    storage.set(keys::VIM, "true").unwrap();

    let (session, emitter) = session_with(storage, 30);

    assert_eq!(session.content(), "Paciente estável");
    assert_eq!(session.preferences().theme, Theme::Dark);
    assert!(session.preferences().vim_enabled);
    assert!(!session.preferences().sidebar_open);
    let docs = emitter.doc_changed_events.lock().unwrap();
    assert_eq!(docs.last().map(|p| p.length), Some(16));
}

#[test]
fn test_complete_and_accept_expands_fields() {
    let (mut session, _emitter) = session_with(pressure_store(), 30);
    session.set_content("Exame pa");

    let completion = session.complete(false).unwrap();
    assert_eq!(completion.from, 6);
    assert_eq!(completion.typed, "pa");
    assert_eq!(completion.candidates.len(), 1);

    let expansion = session
        .accept_candidate(completion.from, &completion.candidates[0])
        .unwrap();

    assert_eq!(expansion, Expansion::Fields { count: 1 });
    assert_eq!(session.content(), "Exame PA 120x80 mmHg");
    assert_eq!(session.selection(), Selection::range(9, 15));
    assert!(session.buffer().has_field_session());

    assert!(session.next_field());
    assert!(!session.buffer().has_field_session());
    assert_eq!(session.selection(), Selection::cursor(15));
}

#[test]
fn test_complete_without_word_needs_explicit_request() {
    let (mut session, _emitter) = session_with(pressure_store(), 30);
    session.set_content("Exame ");

    assert!(session.complete(false).is_none());

    let completion = session.complete(true).unwrap();
    assert_eq!(completion.from, 6);
    assert_eq!(completion.typed, "");
    assert_eq!(completion.candidates.len(), 1);
}

#[test]
fn test_insert_template_toasts_and_checks_index() {
    let (mut session, emitter) = session_with(pressure_store(), 30);

    assert_eq!(
        session.insert_template(5),
        Err(SessionError::Snippet(SnippetError::IndexOutOfRange {
            index: 5,
            len: 1
        }))
    );

    session.insert_template(0).unwrap();
    assert_eq!(session.content(), "PA 120x80 mmHg");
    assert_eq!(emitter.toasts(), vec!["Modelo \"Pressão\" inserido".to_string()]);
}

#[test]
fn test_edits_are_autosaved_on_flush() {
    let storage = Arc::new(MemoryStore::new());
    let (mut session, emitter) = session_with(storage.clone(), 10_000);

    session.set_content("Evolução");
    session.apply_edit(0, 0, "Dia 1 ").unwrap();
    assert_eq!(storage.get(keys::CONTENT).unwrap(), None);

    assert_eq!(session.flush(), Ok(true));
    assert_eq!(
        storage.get(keys::CONTENT).unwrap().as_deref(),
        Some("Dia 1 Evolução")
    );
    assert_eq!(emitter.statuses().last(), Some(&SaveStatus::Saved));
}

#[test]
fn test_dispose_discards_pending_write() {
    let storage = Arc::new(MemoryStore::new());
    let (mut session, _emitter) = session_with(storage.clone(), 10_000);

    session.set_content("rascunho");
    session.dispose();

    assert_eq!(storage.get(keys::CONTENT).unwrap(), None);
    assert_eq!(session.flush(), Ok(false));
}

#[test]
fn test_reset_removes_saved_document() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(keys::CONTENT, "antigo").unwrap();
    let (mut session, _emitter) = session_with(storage.clone(), 10_000);

    session.apply_edit(0, 0, "novo ").unwrap();
    session.reset().unwrap();

    assert_eq!(session.content(), "");
    assert_eq!(session.flush(), Ok(false));
    assert_eq!(storage.get(keys::CONTENT).unwrap(), None);
}

#[test]
fn test_reset_is_not_undone_by_write_in_progress() {
    let storage = Arc::new(SlowStore {
        inner: MemoryStore::new(),
        write_time: Duration::from_millis(300),
    });
    let emitter = Arc::new(MockEventEmitter::new());
    let mut session = EditorSession::init(storage.clone(), emitter, &config(20));

    session.set_content("nota antiga");
    std::thread::sleep(Duration::from_millis(100));
    session.reset().unwrap();

    assert_eq!(storage.get(keys::CONTENT).unwrap(), None);
    std::thread::sleep(Duration::from_millis(400));
    assert_eq!(storage.get(keys::CONTENT).unwrap(), None);
    assert_eq!(session.content(), "");
}

#[test]
fn test_clear_autosaves_empty_document() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(keys::CONTENT, "antigo").unwrap();
    let (mut session, _emitter) = session_with(storage.clone(), 10_000);

    assert!(matches!(
        session.clear(false),
        Err(SessionError::NeedsConfirmation(_))
    ));
    assert_eq!(session.content(), "antigo");
    assert_eq!(session.flush(), Ok(false));

    session.clear(true).unwrap();
    assert_eq!(session.flush(), Ok(true));
    assert_eq!(storage.get(keys::CONTENT).unwrap().as_deref(), Some(""));
}

#[test]
fn test_toggle_case_whole_document() {
    let (mut session, _emitter) = session_with(Arc::new(MemoryStore::new()), 30);
    session.set_content("sem queixas");

    assert_eq!(session.toggle_case(), Ok(true));
    assert_eq!(session.content(), "Sem Queixas");
}

#[test]
fn test_insert_date_stamp() {
    let (mut session, _emitter) = session_with(Arc::new(MemoryStore::new()), 30);
    let now = NaiveDate::from_ymd_opt(2025, 3, 5)
        .unwrap()
        .and_hms_opt(14, 7, 0)
        .unwrap();

    session.insert_date(&now).unwrap();
    assert_eq!(session.content(), "05/03/2025 14:07 - ");
    assert_eq!(session.selection(), Selection::cursor(19));
}

#[test]
fn test_add_template_with_duplicate_trigger_needs_confirmation() {
    let (mut session, emitter) = session_with(pressure_store(), 30);

    let result = session.add_template(draft("Outra", " pa ", "PA"), false);
    assert!(matches!(result, Err(SessionError::NeedsConfirmation(_))));
    assert_eq!(session.snippets().len(), 1);

    assert_eq!(session.add_template(draft("Outra", " pa ", "PA"), true), Ok(1));
    assert_eq!(session.snippets().get(1).unwrap().trigger, "pa");
    assert_eq!(emitter.toasts(), vec!["Modelo salvo!".to_string()]);
}

#[test]
fn test_add_template_rejects_blank_fields() {
    let (mut session, _emitter) = session_with(pressure_store(), 30);

    assert_eq!(
        session.add_template(draft("  ", "x", ""), true),
        Err(SessionError::Snippet(SnippetError::EmptyField("name")))
    );
    assert_eq!(session.snippets().len(), 1);
}

#[test]
fn test_update_and_remove_template() {
    let storage = pressure_store();
    let (mut session, _emitter) = session_with(storage.clone(), 30);

    session
        .update_template(0, draft("Pressão arterial", "pa", "PA ${1}"))
        .unwrap();
    assert_eq!(session.snippets().get(0).unwrap().name, "Pressão arterial");

    assert_eq!(
        session.remove_template(3, false),
        Err(SessionError::Snippet(SnippetError::IndexOutOfRange {
            index: 3,
            len: 1
        }))
    );
    assert!(matches!(
        session.remove_template(0, false),
        Err(SessionError::NeedsConfirmation(_))
    ));
    assert_eq!(session.snippets().len(), 1);

    let removed = session.remove_template(0, true).unwrap();
    assert_eq!(removed.name, "Pressão arterial");
    assert!(session.snippets().is_empty());
    assert_eq!(storage.get(keys::SNIPPETS).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_import_validates_then_asks_for_confirmation() {
    let (mut session, emitter) = session_with(pressure_store(), 30);

    assert!(matches!(
        session.import_templates(r#"{"name":"x"}"#, true),
        Err(SessionError::Snippet(SnippetError::InvalidFormat(_)))
    ));
    assert!(matches!(
        session.import_templates("[]", false),
        Err(SessionError::NeedsConfirmation(_))
    ));
    assert_eq!(session.snippets().len(), 1);

    assert_eq!(session.import_templates("[]", true), Ok(0));
    assert!(session.snippets().is_empty());
    assert_eq!(emitter.toasts(), vec!["Importação concluída!".to_string()]);
}

#[test]
fn test_export_file_round_trips_through_import_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("modelos.json");

    let (session, _emitter) = session_with(pressure_store(), 30);
    session.export_templates_file(&path).unwrap();

    let (mut other, _emitter) = session_with(Arc::new(MemoryStore::new()), 30);
    assert_eq!(other.import_templates_file(&path, true), Ok(1));
    assert_eq!(other.snippets().list(), session.snippets().list());
}

#[test]
fn test_open_file_replaces_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nota.txt");
    std::fs::write(&path, "linha 1\nlinha 2").unwrap();

    let (mut session, emitter) = session_with(Arc::new(MemoryStore::new()), 30);
    session.open_file(&path).unwrap();

    assert_eq!(session.content(), "linha 1\nlinha 2");
    assert_eq!(session.buffer().line_at_caret(), 2);
    assert_eq!(emitter.toasts(), vec!["Arquivo aberto com sucesso".to_string()]);
    assert!(matches!(
        session.open_file(&dir.path().join("missing.txt")),
        Err(SessionError::Io(_))
    ));
}

#[test]
fn test_save_note_refuses_empty_document() {
    let dir = TempDir::new().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    let (mut session, emitter) = session_with(Arc::new(MemoryStore::new()), 30);

    assert_eq!(session.save_note(dir.path(), date), Err(SessionError::EmptyDocument));
    assert_eq!(emitter.toasts(), vec!["Editor vazio".to_string()]);

    session.set_content("Alta hospitalar");
    let path = session.save_note(dir.path(), date).unwrap();
    assert_eq!(path, dir.path().join("evolucao_2025-03-05.txt"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "Alta hospitalar");
}

#[test]
fn test_preference_setters_persist() {
    let storage = Arc::new(MemoryStore::new());
    let (mut session, emitter) = session_with(storage.clone(), 30);

    assert_eq!(session.toggle_theme(), Ok(Theme::Dark));
    session.set_vim(true).unwrap();
    session.set_sidebar(true).unwrap();

    assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    assert_eq!(storage.get(keys::VIM).unwrap().as_deref(), Some("true"));
    assert_eq!(storage.get(keys::SIDEBAR).unwrap().as_deref(), Some("true"));
    assert_eq!(emitter.toasts(), vec!["Modo VIM Ativado".to_string()]);
    assert_eq!(Preferences::load(&session), *session.preferences());
}

#[test]
fn test_open_storage_falls_back_to_memory_on_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let storage = open_storage(&EditorConfig::default().with_storage_path(path.clone()));
    storage.set(keys::THEME, "dark").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
}

#[test]
fn test_open_storage_uses_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let storage = open_storage(&EditorConfig::default().with_storage_path(path.clone()));
    storage.set(keys::THEME, "dark").unwrap();

    assert!(std::fs::read_to_string(&path).unwrap().contains("med_editor_theme"));
}
