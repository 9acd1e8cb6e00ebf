//! Render engine — routes records to templates and output files.
//!
//! | Operation        | Template        | Context keys                     | Output                                  |
//! |------------------|-----------------|----------------------------------|-----------------------------------------|
//! | `render_content` | `<type><sfx>`   | `content`, `version`             | resolved from `file` + `status`         |
//! | `render_index`   | `index<sfx>`    | `posts`, `version`               | `<destination>/<name>`                  |
//! | `render_feed`    | `feed<sfx>`     | `posts`, `pubdate`, `version`    | `<destination>/<name>`                  |
//! | `render_archive` | `archive<sfx>`  | `posts`, `version`               | `<destination>/<name>`                  |
//! | `render_tags`    | `tags<sfx>`     | `tag`, `posts`, `version`        | `<destination>/<dir>/<tag>.html`        |
//!
//! `<sfx>` is the configured template suffix (`.ftl` by default).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use kiln_core::{
    paths::tag_output_path, resolve_output, ContentError, ContentFilter, ContentRecord,
    PublishedFilter, SiteConfig, TagIndex,
};
use kiln_templates::{RenderContext, TemplateService, TeraTemplates};

use crate::error::{template_err, RenderError};
use crate::writer;

pub const INDEX_TEMPLATE: &str = "index";
pub const FEED_TEMPLATE: &str = "feed";
pub const ARCHIVE_TEMPLATE: &str = "archive";
pub const TAGS_TEMPLATE: &str = "tags";

// ---------------------------------------------------------------------------
// Tag outcomes
// ---------------------------------------------------------------------------

/// Result of rendering one tag page.
#[derive(Debug)]
pub struct TagOutcome {
    /// Tag name as supplied by the caller.
    pub tag: String,
    /// Output path the page was (or would have been) written to. For a tag
    /// rejected as a file name this is the tag directory itself.
    pub path: PathBuf,
    pub result: Result<(), RenderError>,
}

impl TagOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders content records into the destination tree.
///
/// Holds no per-render state: every operation can be repeated and yields the
/// same files for the same input (feeds aside, whose `pubdate` is taken at
/// call time).
pub struct Renderer<T = TeraTemplates, F = PublishedFilter> {
    templates: T,
    filter: F,
    source: PathBuf,
    destination: PathBuf,
    version: String,
    template_suffix: String,
}

impl<T: TemplateService> Renderer<T, PublishedFilter> {
    /// Construct a renderer for the site described by `config`.
    pub fn new(templates: T, config: &SiteConfig) -> Self {
        Renderer {
            templates,
            filter: PublishedFilter,
            source: config.source.clone(),
            destination: config.destination.clone(),
            version: config.version.clone(),
            template_suffix: config.template_suffix.clone(),
        }
    }
}

impl<T, F> Renderer<T, F> {
    /// Replace the published-only filter applied to tag pages.
    pub fn with_filter<G: ContentFilter>(self, filter: G) -> Renderer<T, G> {
        Renderer {
            templates: self.templates,
            filter,
            source: self.source,
            destination: self.destination,
            version: self.version,
            template_suffix: self.template_suffix,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn template_name(&self, logical: &str) -> String {
        format!("{logical}{}", self.template_suffix)
    }
}

impl<T: TemplateService, F: ContentFilter> Renderer<T, F> {
    /// Render one record to its resolved output path.
    ///
    /// Both the draft and the published sibling are removed first, so a
    /// record whose status flipped since the last build leaves exactly one
    /// file behind. Returns the path written.
    pub fn render_content(&self, content: &ContentRecord) -> Result<PathBuf, RenderError> {
        let file = content.file()?;
        let content_type = content.content_type()?;
        let status = content.status()?;
        let target = resolve_output(Path::new(file), &self.source, &self.destination, status)?;

        for sibling in target.siblings() {
            writer::delete_if_exists(&sibling)?;
        }

        let path = target.path();
        let ctx = RenderContext::for_content(&self.version, content);
        self.render_to(&self.template_name(content_type), &ctx, &path)?;
        Ok(path)
    }

    /// Render the index page to `<destination>/<output_name>`.
    pub fn render_index(
        &self,
        posts: &[ContentRecord],
        output_name: &str,
    ) -> Result<PathBuf, RenderError> {
        let path = self.destination.join(output_name);
        let ctx = RenderContext::for_posts(&self.version, posts);
        self.render_to(&self.template_name(INDEX_TEMPLATE), &ctx, &path)?;
        Ok(path)
    }

    /// Render the feed with `pubdate` set to now.
    pub fn render_feed(
        &self,
        posts: &[ContentRecord],
        output_name: &str,
    ) -> Result<PathBuf, RenderError> {
        self.render_feed_at(posts, output_name, Utc::now())
    }

    /// Render the feed with an explicit `pubdate`.
    pub fn render_feed_at(
        &self,
        posts: &[ContentRecord],
        output_name: &str,
        pubdate: DateTime<Utc>,
    ) -> Result<PathBuf, RenderError> {
        let path = self.destination.join(output_name);
        let ctx = RenderContext::for_posts(&self.version, posts).with_pubdate(pubdate);
        self.render_to(&self.template_name(FEED_TEMPLATE), &ctx, &path)?;
        Ok(path)
    }

    /// Render the archive page to `<destination>/<output_name>`.
    pub fn render_archive(
        &self,
        posts: &[ContentRecord],
        output_name: &str,
    ) -> Result<PathBuf, RenderError> {
        let path = self.destination.join(output_name);
        let ctx = RenderContext::for_posts(&self.version, posts);
        self.render_to(&self.template_name(ARCHIVE_TEMPLATE), &ctx, &path)?;
        Ok(path)
    }

    /// Render one page per tag under `<destination>/<tag_dir>/`.
    ///
    /// Each tag's records are narrowed to published ones first. A failing
    /// tag is logged and reported in its [`TagOutcome`]; the remaining tags
    /// are still rendered. Tags are processed in lexicographic order, so when
    /// two tags normalize to the same file the first one wins and the later
    /// one fails with [`ContentError::TagCollision`].
    pub fn render_tags(&self, tags: &TagIndex, tag_dir: &str) -> Vec<TagOutcome> {
        let template = self.template_name(TAGS_TEMPLATE);
        let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
        tags.iter()
            .map(|(tag, records)| {
                let (path, result): (PathBuf, Result<(), RenderError>) =
                    match tag_output_path(&self.destination, tag_dir, tag) {
                        Err(e) => (self.destination.join(tag_dir), Err(e.into())),
                        Ok(path) => match claimed.get(&path) {
                            Some(other) => {
                                let err = ContentError::TagCollision {
                                    tag: tag.clone(),
                                    other: other.to_string(),
                                };
                                (path, Err(err.into()))
                            }
                            None => {
                                claimed.insert(path.clone(), tag.as_str());
                                let posts = self.filter.select_published(records);
                                let ctx =
                                    RenderContext::for_posts(&self.version, &posts).with_tag(tag);
                                let result = self.render_to(&template, &ctx, &path);
                                (path, result)
                            }
                        },
                    };
                if let Err(e) = &result {
                    tracing::warn!("tag '{tag}' failed: {e}");
                }
                TagOutcome {
                    tag: tag.clone(),
                    path,
                    result,
                }
            })
            .collect()
    }

    fn render_to(
        &self,
        template_name: &str,
        ctx: &RenderContext<'_>,
        path: &Path,
    ) -> Result<(), RenderError> {
        let template = self
            .templates
            .compile(template_name)
            .map_err(|e| template_err(e, path))?;
        let bytes = self
            .templates
            .render(&template, ctx)
            .map_err(|e| template_err(e, path))?;
        writer::write(path, &bytes)?;
        tracing::info!("rendered: {}", path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
