//! Placeholder scanning and substitution.
//!
//! A placeholder is written `{{KEY}}` where `KEY` is one or more ASCII letters
//! or underscores. Everything else in a template is copied through untouched.

use crate::context::Context;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z_]+)\}\}").expect("placeholder pattern is valid"));

/// The outcome of rendering a template against a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The substituted text.
    pub text: String,
    /// Keys referenced by the template that had no binding, in order of first
    /// appearance and without duplicates.
    pub undefined: Vec<String>,
}

impl Rendered {
    pub fn is_complete(&self) -> bool {
        self.undefined.is_empty()
    }
}

/// Replaces every `{{KEY}}` in `template` with its value from `context`.
///
/// Unbound keys are rendered as [`sentinel`] markers so they stay visible in
/// the output. Replacement values are inserted literally and never re-scanned.
pub fn substitute(template: &str, context: &Context) -> String {
    render(template, context).text
}

/// Same as [`substitute`], but also reports which keys were left undefined.
pub fn render(template: &str, context: &Context) -> Rendered {
    let mut undefined: Vec<String> = Vec::new();

    let text = PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            match context.get(key) {
                Some(value) => value.to_string(),
                None => {
                    if !undefined.iter().any(|seen| seen == key) {
                        undefined.push(key.to_string());
                    }
                    sentinel(key)
                }
            }
        })
        .into_owned();

    Rendered { text, undefined }
}

/// Lists the distinct placeholder keys used by `template`, in order of first
/// appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let key = &caps[1];
        if !keys.iter().any(|seen| seen == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// The marker emitted in place of an unbound placeholder.
pub fn sentinel(key: &str) -> String {
    format!("{{{{__{key}_UNDEFINED__}}}}")
}

/// Returns `true` if `key` can appear inside a placeholder.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
}
