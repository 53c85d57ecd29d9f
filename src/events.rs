// Editor events for UI notification
// Defines event payloads and emission trait for testability

use serde::Serialize;

/// Event names as constants for consistency
pub mod event_names {
    pub const DOC_CHANGED: &str = "doc-change";
    pub const SAVE_STATUS: &str = "save-status";
    pub const SELECTION_CHANGED: &str = "selection-change";
    pub const TOAST: &str = "toast";
}

/// Autosave progress shown in the status bar
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// A change is waiting for the quiet period to elapse
    Saving,
    Saved,
    /// The write failed; the document is only in memory
    Error,
}

/// Payload for doc-change event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocChangedPayload {
    /// Document length in characters
    pub length: usize,
}

/// Payload for save-status event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatusPayload {
    pub status: SaveStatus,
}

/// Payload for selection-change event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChangedPayload {
    /// 1-based line of the caret
    pub line: usize,
}

/// Payload for toast event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToastPayload {
    pub message: String,
}

/// Trait for emitting editor events
/// Allows mocking in tests while the command line logs them
pub trait EditorEventEmitter: Send + Sync {
    fn emit_doc_changed(&self, payload: DocChangedPayload);

    fn emit_save_status(&self, payload: SaveStatusPayload);

    fn emit_selection_changed(&self, payload: SelectionChangedPayload);

    fn emit_toast(&self, payload: ToastPayload);
}

/// Emitter that forwards every event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventEmitter;

impl EditorEventEmitter for LogEventEmitter {
    fn emit_doc_changed(&self, payload: DocChangedPayload) {
        crate::trace!("{}: {} chars", event_names::DOC_CHANGED, payload.length);
    }

    fn emit_save_status(&self, payload: SaveStatusPayload) {
        match payload.status {
            SaveStatus::Error => crate::warn!("{}: {:?}", event_names::SAVE_STATUS, payload.status),
            _ => crate::debug!("{}: {:?}", event_names::SAVE_STATUS, payload.status),
        }
    }

    fn emit_selection_changed(&self, payload: SelectionChangedPayload) {
        crate::trace!("{}: line {}", event_names::SELECTION_CHANGED, payload.line);
    }

    fn emit_toast(&self, payload: ToastPayload) {
        crate::info!("{}", payload.message);
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
