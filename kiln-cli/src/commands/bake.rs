//! `kiln bake` — render a whole site from a content manifest.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use kiln_render::{bake, pipeline, BakeReport, Renderer};
use kiln_templates::TeraTemplates;

use super::SiteArgs;

/// Arguments for `kiln bake`.
#[derive(Args, Debug)]
pub struct BakeArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// JSON array of parsed content records.
    #[arg(long, short)]
    pub manifest: PathBuf,
}

impl BakeArgs {
    pub fn run(self) -> Result<()> {
        let config = self.site.config()?;
        let templates = TeraTemplates::from_dir(&config.templates)
            .with_context(|| format!("failed to load templates from {}", config.templates.display()))?;
        let records = pipeline::load_manifest(&self.manifest)
            .with_context(|| format!("failed to read manifest {}", self.manifest.display()))?;

        let renderer = Renderer::new(templates, &config);
        let report = bake(&renderer, &config, &records);
        print_report(&report);

        let failed = report.failures().count();
        if failed > 0 {
            bail!("{failed} of {} outputs failed to render", report.outcomes.len());
        }
        Ok(())
    }
}

fn print_report(report: &BakeReport) {
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => println!("  {}  {}", "✓".green(), path.display()),
            Err(e) => println!("  {}  {}: {e}", "✗".red(), outcome.label),
        }
    }
    let failed = report.outcomes.len() - report.rendered();
    let summary = format!("{} rendered, {} failed", report.rendered(), failed);
    if failed == 0 {
        println!("{} {summary}", "✓".green());
    } else {
        println!("{} {summary}", "✗".red());
    }
}
