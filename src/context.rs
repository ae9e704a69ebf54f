//! The key/value bindings a template is rendered against.

use crate::error::GenerateError;
use crate::template::is_valid_key;
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const TECHNOLOGIES: &str = "TECHNOLOGIES";
pub const STYLE_GUIDE: &str = "STYLE_GUIDE";
pub const TESTING_FRAMEWORK: &str = "TESTING_FRAMEWORK";
pub const RULES: &str = "RULES";

/// Built-in keys and the values they take when nothing else binds them.
pub const DEFAULTS: [(&str, &str); 5] = [
    (PROJECT_NAME, "Unnamed Project"),
    (TECHNOLOGIES, "Not specified"),
    (STYLE_GUIDE, "Not specified"),
    (TESTING_FRAMEWORK, "Not specified"),
    (RULES, "- Follow standard best practices."),
];

/// A flat mapping from placeholder key to replacement text.
///
/// Every key is guaranteed to satisfy [`is_valid_key`], so each binding can
/// actually be referenced from a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context holding the built-in keys bound to their [`DEFAULTS`].
    pub fn with_defaults() -> Self {
        let values = DEFAULTS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { values }
    }

    /// Binds `key` to `value`, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, GenerateError> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(GenerateError::InvalidKey(key));
        }
        Ok(self.values.insert(key, value.into()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlays every binding of `other` onto `self`.
    pub fn extend(&mut self, other: Context) {
        self.values.extend(other.values);
    }

    /// Loads bindings from a JSON, TOML or YAML file.
    ///
    /// The format is picked from the extension (`.json`, `.toml`, anything
    /// else is read as YAML). The document must be a flat mapping; strings are
    /// taken verbatim, numbers and booleans are stringified and `null` becomes
    /// an empty string.
    pub fn load_file(path: &Path) -> Result<Self, GenerateError> {
        let invalid = |message: String| GenerateError::ContextFile {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let document: YamlValue = match extension.as_deref() {
            Some("json") => {
                let json: serde_json::Value = serde_json::from_str(&content)
                    .map_err(|e| invalid(format!("failed to parse JSON: {e}")))?;
                serde_yaml::to_value(json)
                    .map_err(|e| invalid(format!("failed to convert JSON: {e}")))?
            }
            Some("toml") => {
                let toml_value: toml::Value = toml::from_str(&content)
                    .map_err(|e| invalid(format!("failed to parse TOML: {e}")))?;
                serde_yaml::to_value(toml_value)
                    .map_err(|e| invalid(format!("failed to convert TOML: {e}")))?
            }
            _ => {
                if content.trim().is_empty() {
                    YamlValue::Mapping(Default::default())
                } else {
                    serde_yaml::from_str(&content)
                        .map_err(|e| invalid(format!("failed to parse YAML: {e}")))?
                }
            }
        };

        let YamlValue::Mapping(mapping) = document else {
            return Err(invalid(
                "expected a mapping of placeholder keys to values".to_string(),
            ));
        };

        let mut context = Context::new();
        for (key, value) in mapping {
            let key = match key {
                YamlValue::String(key) => key,
                other => return Err(invalid(format!("key {other:?} is not a string"))),
            };
            let value = scalar_to_string(&value)
                .ok_or_else(|| invalid(format!("value for '{key}' must be a scalar")))?;
            context.insert(key, value)?;
        }

        log::debug!(
            "Loaded {} binding(s) from context file {}",
            context.len(),
            path.display()
        );

        Ok(context)
    }
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some(String::new()),
        _ => None,
    }
}

/// Parses a `KEY=VALUE` assignment. The value may be empty and may itself
/// contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), GenerateError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(GenerateError::InvalidAssignment(raw.to_string()));
    };
    if !is_valid_key(key) {
        return Err(GenerateError::InvalidAssignment(raw.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Turns every literal `\n` (backslash followed by `n`) into a line feed.
pub fn expand_newline_escapes(value: &str) -> String {
    value.replace("\\n", "\n")
}
