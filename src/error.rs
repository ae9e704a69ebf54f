//! Defines custom error types for the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned when an instruction file cannot be generated.
pub enum GenerateError {
    #[error("Template file not found at {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Could not read template file at {}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write to output file at {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template references undefined placeholders: {}", .0.join(", "))]
    UndefinedPlaceholders(Vec<String>),

    #[error("Invalid placeholder key '{0}': keys may only contain ASCII letters and underscores.")]
    InvalidKey(String),

    #[error("Invalid assignment '{0}': expected KEY=VALUE where KEY contains only ASCII letters and underscores.")]
    InvalidAssignment(String),

    #[error("Invalid context file {}: {message}", path.display())]
    ContextFile { path: PathBuf, message: String },
}
