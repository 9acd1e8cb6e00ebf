//! kiln core library — content types, output path resolution, config, errors.
//!
//! Public API surface:
//! - [`types`] — [`ContentRecord`], [`Status`], [`TagIndex`]
//! - [`paths`] — output path resolver and tag file naming
//! - [`filter`] — published-only selection
//! - [`config`] — [`SiteConfig`] loaded from `kiln.yaml`
//! - [`error`] — [`ContentError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod filter;
pub mod paths;
pub mod types;

pub use config::SiteConfig;
pub use error::{ConfigError, ContentError};
pub use filter::{select_published, ContentFilter, PublishedFilter};
pub use paths::{normalize_tag, resolve_output, tag_output_path, OutputTarget};
pub use types::{ContentRecord, Status, TagIndex};
