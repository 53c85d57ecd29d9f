// Snippet expander - inserts a template body at the caret
// Placeholder fields go to the editor's tab-stop session; any failure there
// degrades to inserting the raw body so no content is lost

use super::parse_fields;
use crate::editor::{EditorError, EditorSurface};

/// How a body ended up in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Inserted with a tab-stop session over `count` fields
    Fields { count: usize },
    /// Body had no fields; inserted as text
    Plain,
    /// Field session failed; the raw body (markup included) was inserted
    Literal,
}

/// Insert `body` at the caret, replacing the selection first.
///
/// Errors only when the surface rejects deleting the selection or the literal
/// insertion; in that case nothing was inserted.
pub fn expand<S: EditorSurface + ?Sized>(surface: &mut S, body: &str) -> Result<Expansion, EditorError> {
    let selection = surface.selection();
    if !selection.is_empty() {
        surface.replace_range(selection.from(), selection.to(), "")?;
    }
    let pos = selection.from();

    let snippet = match parse_fields(body) {
        Ok(snippet) => snippet,
        Err(e) => {
            crate::warn!("Placeholder parse failed, inserting literal text: {}", e);
            surface.insert_at(pos, body)?;
            return Ok(Expansion::Literal);
        }
    };

    if snippet.fields.is_empty() {
        surface.insert_at(pos, &snippet.text)?;
        return Ok(Expansion::Plain);
    }

    match surface.begin_field_session(pos, &snippet) {
        Ok(()) => {
            crate::debug!("Expanded snippet with {} fields at {}", snippet.fields.len(), pos);
            Ok(Expansion::Fields {
                count: snippet.fields.len(),
            })
        }
        Err(e) => {
            crate::warn!("Field session failed, inserting literal text: {}", e);
            surface.insert_at(pos, body)?;
            Ok(Expansion::Literal)
        }
    }
}

#[cfg(test)]
#[path = "expander_test.rs"]
mod tests;
