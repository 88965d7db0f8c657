//! Banned-word masking filters.
//!
//! Two independent variants with different, known blind spots: the
//! [`substrings`] filter matches case-sensitively anywhere in the text
//! (including inside larger words), while the [`tokens`] filter matches
//! case-insensitively but only whole whitespace-delimited tokens. The two
//! are separate entry points; neither replaces the other, and each keeps
//! its own blind spots.

pub mod substrings;
pub mod tokens;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("expected a string value, got {actual}")]
    NotText { actual: &'static str },
}

/// Which masking variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Substrings,
    Tokens,
}

impl Filter {
    /// Apply the filter to a dynamically-typed value.
    ///
    /// Anything other than a string is rejected outright, naming the
    /// offending kind; there is no coercion and no partial output.
    pub fn apply(&self, value: &Value) -> Result<String, FilterError> {
        match value {
            Value::String(text) => Ok(match self {
                Filter::Substrings => substrings::mask(text),
                Filter::Tokens => tokens::mask(text),
            }),
            other => Err(FilterError::NotText {
                actual: value_kind(other),
            }),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// First character kept, one `*` per remaining character. Counts
/// characters, not bytes: `"Блин"` masks to `"Б***"`.
pub(crate) fn mask_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first, "*".repeat(chars.count())),
        None => String::new(),
    }
}
