//! Site configuration.
//!
//! # Storage layout
//!
//! ```text
//! <source>/
//!   kiln.yaml      (optional, every key may be omitted)
//!   content/       (mirrored onto <destination>)
//!   templates/     (default template directory)
//! ```
//!
//! Relative paths in `kiln.yaml` are resolved against `<source>`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "kiln.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".ftl";

/// On-disk shape of `kiln.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub destination: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub version: Option<String>,
    pub template_suffix: Option<String>,
    pub index_file: Option<String>,
    pub feed_file: Option<String>,
    pub archive_file: Option<String>,
    pub tag_path: Option<String>,
}

/// Fully resolved configuration for one site build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Site root; content lives in `<source>/content`.
    pub source: PathBuf,
    pub destination: PathBuf,
    pub templates: PathBuf,
    /// Build version injected into every template context.
    pub version: String,
    /// Appended to template names (`post` → `post.ftl`).
    pub template_suffix: String,
    pub index_file: String,
    pub feed_file: String,
    pub archive_file: String,
    /// Directory under `destination` that receives tag pages.
    pub tag_path: String,
}

impl SiteConfig {
    /// Defaults for a site rooted at `source`.
    pub fn with_defaults(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        SiteConfig {
            destination: source.join(DEFAULT_OUTPUT_DIR),
            templates: source.join(DEFAULT_TEMPLATES_DIR),
            version: env!("CARGO_PKG_VERSION").to_string(),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            index_file: "index.html".to_string(),
            feed_file: "feed.xml".to_string(),
            archive_file: "archive.html".to_string(),
            tag_path: "tags".to_string(),
            source,
        }
    }

    /// Load `<source>/kiln.yaml` on top of the defaults.
    ///
    /// A missing file is not an error; a malformed one is
    /// [`ConfigError::Parse`] with the file path.
    pub fn load_at(source: &Path) -> Result<Self, ConfigError> {
        let path = source.join(CONFIG_FILE);
        let defaults = Self::with_defaults(source);
        if !path.exists() {
            return Ok(defaults);
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        if contents.trim().is_empty() {
            return Ok(defaults);
        }
        let file: ConfigFile =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?;
        Ok(defaults.merge(file))
    }

    /// Overlay the keys present in `file`.
    pub fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(dest) = file.destination {
            self.destination = self.source.join(dest);
        }
        if let Some(templates) = file.templates {
            self.templates = self.source.join(templates);
        }
        if let Some(v) = file.version {
            self.version = v;
        }
        if let Some(v) = file.template_suffix {
            self.template_suffix = v;
        }
        if let Some(v) = file.index_file {
            self.index_file = v;
        }
        if let Some(v) = file.feed_file {
            self.feed_file = v;
        }
        if let Some(v) = file.archive_file {
            self.archive_file = v;
        }
        if let Some(v) = file.tag_path {
            self.tag_path = v;
        }
        self
    }
}
