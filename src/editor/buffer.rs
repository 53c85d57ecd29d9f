// In-memory document buffer implementing EditorSurface
// Tracks the main selection and an optional placeholder field session

use super::{EditorError, EditorSurface, Selection};
use crate::snippets::FieldSnippet;
use std::ops::Range;

/// Active tab-stop session after a snippet insertion
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSession {
    /// Ranges of each field, in tab order
    fields: Vec<Vec<Range<usize>>>,
    /// Index into `fields` of the selected field
    active: usize,
}

/// Plain-text document with a single selection
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    selection: Selection,
    session: Option<FieldSession>,
}

/// Map a position through the replacement of `from..to` by `inserted` bytes.
/// Positions inside the replaced range land at its new end.
fn map_pos(pos: usize, from: usize, to: usize, inserted: usize) -> usize {
    if pos < from {
        pos
    } else if pos >= to && (pos > from || from == to) {
        pos - (to - from) + inserted
    } else {
        from + inserted
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the caret at the start
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replace the whole document, caret at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = Selection::cursor(self.text.len());
        self.session = None;
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 1-based line number of the caret
    pub fn line_at_caret(&self) -> usize {
        self.text[..self.selection.head].matches('\n').count() + 1
    }

    /// Index (in tab order) of the selected field, if a session is active
    pub fn active_field(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.active)
    }

    pub fn has_field_session(&self) -> bool {
        self.session.is_some()
    }

    /// Move to the next field. Moving past the last field ends the session.
    ///
    /// Returns false when no session was active.
    pub fn next_field(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.active + 1 >= session.fields.len() {
            let end = session.fields[session.active]
                .first()
                .map(|r| r.end)
                .unwrap_or(self.selection.head);
            self.session = None;
            self.selection = Selection::cursor(end);
            return true;
        }
        session.active += 1;
        self.select_active_field();
        true
    }

    /// Move to the previous field. Returns false at the first field or without a session.
    pub fn prev_field(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) if session.active > 0 => {
                session.active -= 1;
                self.select_active_field();
                true
            }
            _ => false,
        }
    }

    fn select_active_field(&mut self) {
        if let Some(range) = self
            .session
            .as_ref()
            .and_then(|s| s.fields.get(s.active))
            .and_then(|ranges| ranges.first())
        {
            self.selection = Selection::range(range.start, range.end);
        }
    }

    fn check_pos(&self, pos: usize) -> Result<(), EditorError> {
        if pos > self.text.len() {
            return Err(EditorError::OutOfBounds {
                from: pos,
                to: pos,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(pos) {
            return Err(EditorError::NotCharBoundary(pos));
        }
        Ok(())
    }

    fn check_range(&self, from: usize, to: usize) -> Result<(), EditorError> {
        if from > to || to > self.text.len() {
            return Err(EditorError::OutOfBounds {
                from,
                to,
                len: self.text.len(),
            });
        }
        self.check_pos(from)?;
        self.check_pos(to)
    }

    /// Map field ranges through an edit. An edit that straddles a field
    /// boundary ends the session.
    fn map_session(&mut self, from: usize, to: usize, inserted: usize) {
        let mut straddled = false;
        if let Some(session) = self.session.as_mut() {
            'fields: for ranges in session.fields.iter_mut() {
                for range in ranges.iter_mut() {
                    if from >= range.start && to <= range.end {
                        range.end = range.end - (to - from) + inserted;
                    } else if to <= range.start {
                        range.start = range.start - (to - from) + inserted;
                        range.end = range.end - (to - from) + inserted;
                    } else if from < range.end {
                        straddled = true;
                        break 'fields;
                    }
                }
            }
        }
        if straddled {
            self.session = None;
        }
    }
}

impl EditorSurface for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) -> Result<(), EditorError> {
        self.check_pos(selection.anchor)?;
        self.check_pos(selection.head)?;
        self.selection = selection;
        Ok(())
    }

    fn replace_range(&mut self, from: usize, to: usize, insert: &str) -> Result<(), EditorError> {
        self.check_range(from, to)?;
        self.text.replace_range(from..to, insert);
        let inserted = insert.len();
        self.selection = Selection::range(
            map_pos(self.selection.anchor, from, to, inserted),
            map_pos(self.selection.head, from, to, inserted),
        );
        self.map_session(from, to, inserted);
        Ok(())
    }

    fn begin_field_session(&mut self, at: usize, snippet: &FieldSnippet) -> Result<(), EditorError> {
        self.check_pos(at)?;
        if snippet.fields.iter().any(|f| f.ranges.is_empty()) {
            return Err(EditorError::FieldSessionRejected(
                "field without a range".to_string(),
            ));
        }

        self.text.insert_str(at, &snippet.text);
        let fields: Vec<Vec<Range<usize>>> = snippet
            .fields
            .iter()
            .map(|f| {
                f.ranges
                    .iter()
                    .map(|r| (r.start + at)..(r.end + at))
                    .collect()
            })
            .collect();

        if fields.is_empty() {
            self.session = None;
            self.selection = Selection::cursor(at + snippet.text.len());
        } else {
            self.session = Some(FieldSession { fields, active: 0 });
            self.select_active_field();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod tests;
