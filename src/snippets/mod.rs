// Snippet templates - storage, placeholder parsing, completion and expansion

mod completion;
mod defaults;
mod expander;
mod placeholder;
mod store;
mod template;

pub use completion::{completion_candidates, Completion, CompletionCandidate};
pub use defaults::default_templates;
pub use expander::{expand, Expansion};
pub use placeholder::{parse_fields, Field, FieldSnippet, PlaceholderError};
pub use store::{SnippetError, SnippetStore};
pub use template::{Template, TemplateDraft};
