pub mod bake;
pub mod templates;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kiln_core::SiteConfig;

/// Site location plus flags that override `kiln.yaml`.
#[derive(Args, Debug)]
pub struct SiteArgs {
    /// Site root containing `content/`, `templates/` and optionally `kiln.yaml`.
    pub source: PathBuf,

    /// Output directory (default: `<source>/output`).
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Template directory (default: `<source>/templates`).
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Version string exposed to templates as `version`.
    #[arg(long)]
    pub build_version: Option<String>,
}

impl SiteArgs {
    /// Load `kiln.yaml` and apply command-line overrides.
    ///
    /// A relative `source` is anchored at the working directory so it lines
    /// up with the absolute `file` paths in a manifest.
    pub fn config(&self) -> Result<SiteConfig> {
        let source = if self.source.is_absolute() {
            self.source.clone()
        } else {
            std::env::current_dir()
                .context("failed to read the working directory")?
                .join(&self.source)
        };
        let mut config = SiteConfig::load_at(&source)
            .with_context(|| format!("failed to load site config from {}", source.display()))?;
        if let Some(dest) = &self.destination {
            config.destination = dest.clone();
        }
        if let Some(templates) = &self.templates {
            config.templates = templates.clone();
        }
        if let Some(version) = &self.build_version {
            config.version = version.clone();
        }
        Ok(config)
    }
}
