//! `kiln templates` — list the templates a site would load.

use anyhow::{Context, Result};
use clap::Args;

use kiln_templates::TeraTemplates;

use super::SiteArgs;

/// Arguments for `kiln templates`.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl TemplatesArgs {
    pub fn run(self) -> Result<()> {
        let config = self.site.config()?;
        let templates = TeraTemplates::from_dir(&config.templates)
            .with_context(|| format!("failed to load templates from {}", config.templates.display()))?;
        for name in templates.template_names() {
            println!("{name}");
        }
        Ok(())
    }
}
