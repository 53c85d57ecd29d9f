// Completion bridge - adapts the template collection into completion candidates
// Filtering against the typed word is left to the editing component

use super::Template;
use serde::Serialize;

/// One completion option, keyed by trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCandidate {
    /// Label the user types (the template trigger)
    pub trigger: String,
    /// Detail shown next to the label (the template name)
    pub display_name: String,
    /// Text handed to the expander on acceptance
    pub body: String,
}

impl From<&Template> for CompletionCandidate {
    fn from(template: &Template) -> Self {
        Self {
            trigger: template.trigger.clone(),
            display_name: template.name.clone(),
            body: template.body.clone(),
        }
    }
}

/// Result of a completion query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Byte offset where the typed word starts; accepting replaces from here to the caret
    pub from: usize,
    /// The typed word
    pub typed: String,
    /// One candidate per stored template, in collection order
    pub candidates: Vec<CompletionCandidate>,
}

/// ASCII letters, digits and underscore; accented letters end the word
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Start offset of the run of word characters ending at the end of `text`
fn word_start(text: &str) -> usize {
    text.char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Build completion candidates for the text before the caret.
///
/// Returns `None` when no word is being typed and completion was not
/// explicitly requested. Otherwise every template becomes a candidate.
pub fn completion_candidates(
    templates: &[Template],
    preceding_text: &str,
    explicit: bool,
) -> Option<Completion> {
    let from = word_start(preceding_text);
    if from == preceding_text.len() && !explicit {
        return None;
    }

    Some(Completion {
        from,
        typed: preceding_text[from..].to_string(),
        candidates: templates.iter().map(CompletionCandidate::from).collect(),
    })
}

#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;
