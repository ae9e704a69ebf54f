//! `instruction-gen` renders instruction files from plain-text templates.
//!
//! A template contains `{{KEY}}` placeholders. Each one is replaced by the
//! value bound to `KEY` in a [`Context`]; placeholders without a binding are
//! rendered as `{{__KEY_UNDEFINED__}}` so they remain visible in the output.
//!
//! # Example
//!
//! ```rust
//! use instruction_gen::context::Context;
//! use instruction_gen::template::substitute;
//!
//! # fn demo() -> Result<(), instruction_gen::error::GenerateError> {
//! let mut context = Context::with_defaults();
//! context.insert("PROJECT_NAME", "Acme")?;
//!
//! let text = substitute("Hello, {{PROJECT_NAME}}! {{OWNER}}", &context);
//! assert_eq!(text, "Hello, Acme! {{__OWNER_UNDEFINED__}}");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod context;
pub mod error;
pub mod template;

use crate::context::Context;
use crate::error::GenerateError;
use crate::template::{placeholders, render, sentinel, Rendered};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder as TempFileBuilder;

/// What to do when a template references a key the context does not bind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UndefinedPolicy {
    /// Emit a sentinel marker and carry on.
    #[default]
    Sentinel,
    /// Fail with [`GenerateError::UndefinedPlaceholders`].
    Reject,
}

/// Reads a template file as UTF-8 text.
pub fn read_template(path: &Path) -> Result<String, GenerateError> {
    log::debug!("Reading template {}", path.display());

    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => GenerateError::TemplateNotFound {
            path: path.to_path_buf(),
        },
        _ => GenerateError::TemplateRead {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Renders `template` and applies `policy` to any undefined placeholders.
pub fn render_checked(
    template: &str,
    context: &Context,
    policy: UndefinedPolicy,
) -> Result<Rendered, GenerateError> {
    if log::log_enabled!(log::Level::Debug) {
        let keys = placeholders(template);
        log::debug!(
            "Template references {} placeholder(s): {}",
            keys.len(),
            keys.join(", ")
        );
    }

    let rendered = render(template, context);

    if rendered.is_complete() {
        return Ok(rendered);
    }

    match policy {
        UndefinedPolicy::Reject => Err(GenerateError::UndefinedPlaceholders(rendered.undefined)),
        UndefinedPolicy::Sentinel => {
            for key in &rendered.undefined {
                log::warn!(
                    "Placeholder '{{{{{key}}}}}' has no value; rendered as {}",
                    sentinel(key)
                );
            }
            Ok(rendered)
        }
    }
}

/// Writes `contents` to `path`, creating or replacing it.
///
/// The text is written to a temporary file next to the destination and then
/// moved over it, so a failed write never leaves a truncated file behind. An
/// existing destination is resolved through symlinks and keeps its
/// permissions; a new file gets the same mode `fs::write` would give it.
pub fn write_output(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let write_error = |source: io::Error| GenerateError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let (target, existing_permissions) = match fs::canonicalize(path) {
        Ok(resolved) => {
            let permissions = fs::metadata(&resolved).map_err(write_error)?.permissions();
            (resolved, Some(permissions))
        }
        Err(_) => (path.to_path_buf(), None),
    };

    let parent_dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = TempFileBuilder::new();
    builder.prefix(".instruction-gen-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut temp_file = builder.tempfile_in(parent_dir).map_err(write_error)?;

    if let Some(permissions) = existing_permissions {
        temp_file
            .as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
    }

    temp_file
        .write_all(contents.as_bytes())
        .and_then(|()| temp_file.flush())
        .map_err(write_error)?;

    temp_file.persist(&target).map_err(|e| write_error(e.error))?;

    log::debug!("Wrote {} byte(s) to {}", contents.len(), target.display());
    Ok(())
}

/// Reads the template at `template_path`, substitutes `context` into it and
/// writes the result to `output_path`.
///
/// Nothing is written if the template cannot be read or, under
/// [`UndefinedPolicy::Reject`], if any placeholder is left undefined.
pub fn generate(
    template_path: &Path,
    output_path: &Path,
    context: &Context,
    policy: UndefinedPolicy,
) -> Result<Rendered, GenerateError> {
    let template = read_template(template_path)?;
    let rendered = render_checked(&template, context, policy)?;
    write_output(output_path, &rendered.text)?;
    Ok(rendered)
}
