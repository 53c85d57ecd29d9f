//! Text-editing component boundary.
//!
//! The snippet bridge never touches a document directly; it drives an
//! [`EditorSurface`]. [`TextBuffer`] is the in-process implementation used by
//! the session and the command line.

mod buffer;
mod commands;
mod matcher;

pub use buffer::TextBuffer;
pub use commands::{insert_date, toggle_case, toggle_case_text};
pub use matcher::filter_candidates;

use crate::snippets::FieldSnippet;

/// Main selection of the document, in byte offsets.
///
/// `head` is the caret; `anchor` is the other end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    /// Empty selection (caret) at `pos`
    pub fn cursor(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn range(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Error types for editing operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// Range falls outside the document
    #[error("Range {from}..{to} is outside the document (length {len})")]
    OutOfBounds { from: usize, to: usize, len: usize },
    /// Position splits a multi-byte character
    #[error("Position {0} is not on a character boundary")]
    NotCharBoundary(usize),
    /// The component refused to start a placeholder field session
    #[error("Field session rejected: {0}")]
    FieldSessionRejected(String),
}

/// Operations the snippet bridge needs from a text-editing component.
pub trait EditorSurface {
    /// Full document text
    fn text(&self) -> &str;

    /// Current main selection
    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection) -> Result<(), EditorError>;

    /// Replace `from..to` with `insert`. The selection is mapped through the change.
    fn replace_range(&mut self, from: usize, to: usize, insert: &str) -> Result<(), EditorError>;

    /// Insert `text` at `pos`
    fn insert_at(&mut self, pos: usize, text: &str) -> Result<(), EditorError> {
        self.replace_range(pos, pos, text)
    }

    /// Insert `snippet.text` at `at` and start tab-stop cycling over its fields,
    /// selecting the first one.
    ///
    /// Must be all-or-nothing: on error the document is unchanged.
    fn begin_field_session(&mut self, at: usize, snippet: &FieldSnippet) -> Result<(), EditorError>;
}
