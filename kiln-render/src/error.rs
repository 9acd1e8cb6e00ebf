//! Error types for kiln-render.

use std::path::{Path, PathBuf};

use thiserror::Error;

use kiln_core::ContentError;
use kiln_templates::TemplateError;

/// All errors that can arise from a render operation.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The record is unusable: missing field, unknown status, no file
    /// extension, or a file outside `<source>/content`.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The template service has no template under `name`.
    #[error("template {name} not found (rendering {target})")]
    TemplateNotFound { name: String, target: PathBuf },

    /// The template failed while rendering.
    #[error("template {name} failed rendering {target}: {message}")]
    TemplateRender {
        name: String,
        target: PathBuf,
        message: String,
    },

    /// Template set could not be loaded.
    #[error("template error: {0}")]
    Template(TemplateError),

    /// Directory creation, file write, rename or stale-file removal failed.
    #[error("I/O error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content manifest could not be read.
    #[error("I/O error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content manifest is not a JSON array of records.
    #[error("invalid content manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience constructor for [`RenderError::Write`].
pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Write {
        path: path.into(),
        source,
    }
}

/// Attach the output path to a template service error.
pub(crate) fn template_err(err: TemplateError, target: &Path) -> RenderError {
    match err {
        TemplateError::NotFound { name } => RenderError::TemplateNotFound {
            name,
            target: target.to_path_buf(),
        },
        TemplateError::Render { name, message } => RenderError::TemplateRender {
            name,
            target: target.to_path_buf(),
            message,
        },
        other => RenderError::Template(other),
    }
}
