// Template records and the form-level draft that produces them

use super::SnippetError;
use serde::{Deserialize, Serialize};

/// A named snippet expanded into the note when its trigger is accepted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Display label (e.g., "SOAP Padrão")
    pub name: String,
    /// Keyword typed to invoke completion (e.g., "soap")
    pub trigger: String,
    /// Inserted text; may contain `${1:default}` placeholder fields
    #[serde(rename = "content")]
    pub body: String,
}

impl Template {
    pub fn new(
        name: impl Into<String>,
        trigger: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            trigger: trigger.into(),
            body: body.into(),
        }
    }
}

/// Unvalidated template as typed into the edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub trigger: String,
    pub body: String,
}

impl TemplateDraft {
    /// Trim name and trigger and require both to be non-empty.
    /// The body is kept verbatim.
    pub fn validate(self) -> Result<Template, SnippetError> {
        let name = self.name.trim();
        let trigger = self.trigger.trim();
        if name.is_empty() {
            return Err(SnippetError::EmptyField("name"));
        }
        if trigger.is_empty() {
            return Err(SnippetError::EmptyField("trigger"));
        }
        Ok(Template::new(name, trigger, self.body))
    }
}

#[cfg(test)]
#[path = "template_test.rs"]
mod tests;
