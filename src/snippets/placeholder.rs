// Placeholder field parser
// Turns `${1:default}` style markup into plain text plus tab-stop ranges

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// `${n:default}`, `${n}`, `${name}` and the same with `#{...}`
fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[#$]\{(?:(\d+)(?::([^}]*))?|((?:\\[{}]|[^}])*))\}")
            .expect("field pattern is valid")
    })
}

/// Errors raised while parsing placeholder markup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceholderError {
    /// Field number does not fit in u32
    #[error("Field number '{0}' is out of range")]
    NumberOutOfRange(String),
}

/// One tab stop. Several ranges when the same field appears more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Explicit field number, `None` for named/unnumbered fields
    pub number: Option<u32>,
    /// Byte ranges in `FieldSnippet::text`
    pub ranges: Vec<Range<usize>>,
}

/// Snippet body with markup resolved
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSnippet {
    /// Text to insert, with default values in place of the markup
    pub text: String,
    /// Fields in tab order
    pub fields: Vec<Field>,
}

/// Resolve `\{` and `\}` escapes
fn unescape_braces(text: &str) -> String {
    text.replace("\\{", "{").replace("\\}", "}")
}

#[derive(PartialEq, Eq)]
enum FieldKey {
    Number(u32),
    Name(String),
    Anonymous,
}

/// Parse placeholder markup in `body`.
///
/// Numbered fields come first in ascending order, then named ones in order of
/// appearance. Fields sharing a number (or a non-empty name) are merged.
pub fn parse_fields(body: &str) -> Result<FieldSnippet, PlaceholderError> {
    let mut text = String::with_capacity(body.len());
    let mut found: Vec<(FieldKey, Range<usize>)> = Vec::new();
    let mut last = 0;

    for caps in field_pattern().captures_iter(body) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        text.push_str(&unescape_braces(&body[last..whole.start()]));
        last = whole.end();

        let (key, default) = if let Some(number) = caps.get(1) {
            let n = number
                .as_str()
                .parse::<u32>()
                .map_err(|_| PlaceholderError::NumberOutOfRange(number.as_str().to_string()))?;
            let default = caps
                .get(2)
                .map(|m| unescape_braces(m.as_str()))
                .unwrap_or_default();
            (FieldKey::Number(n), default)
        } else {
            let name = caps
                .get(3)
                .map(|m| unescape_braces(m.as_str()))
                .unwrap_or_default();
            if name.is_empty() {
                (FieldKey::Anonymous, name)
            } else {
                (FieldKey::Name(name.clone()), name)
            }
        };

        let start = text.len();
        text.push_str(&default);
        found.push((key, start..text.len()));
    }
    text.push_str(&unescape_braces(&body[last..]));

    let mut numbered: Vec<(u32, Field)> = Vec::new();
    let mut named: Vec<(Option<String>, Field)> = Vec::new();
    for (key, range) in found {
        match key {
            FieldKey::Number(n) => match numbered.iter_mut().find(|(m, _)| *m == n) {
                Some((_, field)) => field.ranges.push(range),
                None => numbered.push((
                    n,
                    Field {
                        number: Some(n),
                        ranges: vec![range],
                    },
                )),
            },
            FieldKey::Name(name) => match named.iter_mut().find(|(m, _)| m.as_deref() == Some(&name)) {
                Some((_, field)) => field.ranges.push(range),
                None => named.push((
                    Some(name),
                    Field {
                        number: None,
                        ranges: vec![range],
                    },
                )),
            },
            FieldKey::Anonymous => named.push((
                None,
                Field {
                    number: None,
                    ranges: vec![range],
                },
            )),
        }
    }
    numbered.sort_by_key(|(n, _)| *n);

    let fields = numbered
        .into_iter()
        .map(|(_, f)| f)
        .chain(named.into_iter().map(|(_, f)| f))
        .collect();

    Ok(FieldSnippet { text, fields })
}

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod tests;
