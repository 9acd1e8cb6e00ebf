//! Error types for kiln-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a content record or deriving its output path.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A key the rendering stage depends on is absent or not a string.
    #[error("content record is missing required field `{field}`")]
    MissingField { field: &'static str },

    /// `status` is neither `draft` nor `published`.
    #[error("unknown content status `{status}`; expected: draft, published")]
    UnknownStatus { status: String },

    /// The source file name has no extension separator.
    #[error("invalid content path {path}: file name has no extension")]
    InvalidContentPath { path: PathBuf },

    /// The source file does not live under `<source>/content`.
    #[error("cannot resolve output for {path}: not under {content_root}")]
    PathResolution { path: PathBuf, content_root: PathBuf },

    /// The tag does not normalize to a single plain file name.
    #[error("tag `{tag}` cannot be used as a file name")]
    InvalidTag { tag: String },

    /// Two tags normalize to the same output file.
    #[error("tag `{tag}` writes the same file as tag `{other}`")]
    TagCollision { tag: String, other: String },
}

/// Errors raised while loading `kiln.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML; serde_yaml supplies the line.
    #[error("failed to parse site config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
