//! Whole-site bake entrypoint used by the CLI.
//!
//! Order: every content record, then index, archive and feed built from the
//! published `post` records, then one page per tag. Nothing here stops at
//! the first failure; the caller inspects the [`BakeReport`].

use std::path::{Path, PathBuf};

use kiln_core::{select_published, ContentFilter, ContentRecord, SiteConfig, TagIndex};
use kiln_templates::TemplateService;

use crate::error::RenderError;
use crate::renderer::Renderer;

/// Record type listed on index, archive and feed pages.
pub const POST_TYPE: &str = "post";

/// Outcome of one rendered unit.
#[derive(Debug)]
pub struct Outcome {
    /// Human-readable name of the unit (`file` value, `index`, `tag:<name>`…).
    pub label: String,
    pub result: Result<PathBuf, RenderError>,
}

/// Everything a bake produced, in render order.
#[derive(Debug, Default)]
pub struct BakeReport {
    pub outcomes: Vec<Outcome>,
}

impl BakeReport {
    pub fn rendered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    fn push(&mut self, label: impl Into<String>, result: Result<PathBuf, RenderError>) {
        let label = label.into();
        if let Err(e) = &result {
            tracing::error!("{label}: {e}");
        }
        self.outcomes.push(Outcome { label, result });
    }
}

/// Read a JSON array of content records.
pub fn load_manifest(path: &Path) -> Result<Vec<ContentRecord>, RenderError> {
    let contents = std::fs::read_to_string(path).map_err(|e| RenderError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| RenderError::Manifest {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Published records of type `post`, in input order.
pub fn published_posts(records: &[ContentRecord]) -> Vec<ContentRecord> {
    select_published(records)
        .into_iter()
        .filter(|r| r.get_str("type") == Some(POST_TYPE))
        .collect()
}

/// Render a whole site from `records`.
pub fn bake<T, F>(
    renderer: &Renderer<T, F>,
    config: &SiteConfig,
    records: &[ContentRecord],
) -> BakeReport
where
    T: TemplateService,
    F: ContentFilter,
{
    let mut report = BakeReport::default();

    for (i, record) in records.iter().enumerate() {
        let label = record
            .get_str("file")
            .map(str::to_string)
            .unwrap_or_else(|| format!("record #{i}"));
        report.push(label, renderer.render_content(record));
    }

    let posts = published_posts(records);
    report.push("index", renderer.render_index(&posts, &config.index_file));
    report.push("archive", renderer.render_archive(&posts, &config.archive_file));
    report.push("feed", renderer.render_feed(&posts, &config.feed_file));

    let tags = TagIndex::from_records(records);
    for outcome in renderer.render_tags(&tags, &config.tag_path) {
        let path = outcome.path;
        report.push(format!("tag:{}", outcome.tag), outcome.result.map(|()| path));
    }

    tracing::debug!(
        "bake finished: {} rendered, {} failed",
        report.rendered(),
        report.outcomes.len() - report.rendered()
    );
    report
}
