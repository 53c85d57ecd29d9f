// Editing commands offered by the toolbar: date stamp and case toggling

use super::{EditorError, EditorSurface, Selection};
use crate::util::date::date_stamp;
use chrono::NaiveDateTime;

/// Replace the selection with a `dd/mm/yyyy HH:MM - ` stamp and put the caret after it.
pub fn insert_date<S: EditorSurface + ?Sized>(
    surface: &mut S,
    now: &NaiveDateTime,
) -> Result<(), EditorError> {
    let stamp = date_stamp(now);
    let selection = surface.selection();
    surface.replace_range(selection.from(), selection.to(), &stamp)?;
    surface.set_selection(Selection::cursor(selection.from() + stamp.len()))
}

/// Cycle the case of `text`: upper -> lower -> capitalized words -> upper.
pub fn toggle_case_text(text: &str) -> String {
    let upper = text.to_uppercase();
    let lower = text.to_lowercase();

    if text == upper && text != lower {
        lower
    } else if text == lower {
        let mut out = String::with_capacity(text.len());
        let mut after_letter = false;
        for c in text.chars() {
            if c.is_alphabetic() && !after_letter {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            after_letter = c.is_alphabetic();
        }
        out
    } else {
        upper
    }
}

/// Toggle the case of the selection, or of the whole document when the
/// selection is empty. A non-empty selection stays selected over the new text.
///
/// Returns false when there was nothing to change.
pub fn toggle_case<S: EditorSurface + ?Sized>(surface: &mut S) -> Result<bool, EditorError> {
    let selection = surface.selection();
    let (from, to) = if selection.is_empty() {
        (0, surface.text().len())
    } else {
        (selection.from(), selection.to())
    };
    if from == to {
        return Ok(false);
    }

    let replaced = toggle_case_text(&surface.text()[from..to]);
    surface.replace_range(from, to, &replaced)?;
    if !selection.is_empty() {
        surface.set_selection(Selection::range(from, from + replaced.len()))?;
    }
    Ok(true)
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
