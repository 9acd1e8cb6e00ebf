//! Error types for kiln-templates.

use std::error::Error as _;
use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading, compiling or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template is registered under `name`.
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// The template exists but failed while rendering (undefined variable,
    /// bad filter argument, context that cannot be serialized…).
    #[error("failed to render template {name}: {message}")]
    Render { name: String, message: String },

    /// The template set could not be parsed.
    #[error("failed to load templates: {message}")]
    Load { message: String },

    /// Filesystem error while reading the template directory.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> TemplateError {
    TemplateError::Io {
        path: path.into(),
        source,
    }
}

/// Flatten a tera error and its causes into one line.
///
/// Tera's top-level message only names the template; the useful part
/// (which variable, which line) lives in the source chain.
pub(crate) fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}
