//! Template service — the [`TemplateService`] seam and its Tera implementation.
//!
//! # Naming
//!
//! Templates are registered under their path relative to the template
//! directory, with `/` separators:
//!
//! | File on disk                   | Template name     |
//! |--------------------------------|-------------------|
//! | `templates/post.ftl`           | `post.ftl`        |
//! | `templates/partials/head.ftl`  | `partials/head.ftl` |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::RenderContext;
use crate::error::{describe, io_err, TemplateError};

// ---------------------------------------------------------------------------
// Service seam
// ---------------------------------------------------------------------------

/// Handle to a template that [`TemplateService::compile`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    name: String,
}

impl CompiledTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        CompiledTemplate { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Compile-by-name and render-to-bytes; everything the renderer needs from a
/// template engine.
pub trait TemplateService {
    /// Look up `name`; fails with [`TemplateError::NotFound`].
    fn compile(&self, name: &str) -> Result<CompiledTemplate, TemplateError>;

    /// Render fully into memory; fails with [`TemplateError::Render`].
    fn render(
        &self,
        template: &CompiledTemplate,
        ctx: &RenderContext<'_>,
    ) -> Result<Vec<u8>, TemplateError>;
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), TemplateError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_templates(dir: &Path) -> Result<Vec<(String, String)>, TemplateError> {
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::with_capacity(files.len());
    for path in files {
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// TeraTemplates
// ---------------------------------------------------------------------------

/// Tera-backed [`TemplateService`].
///
/// All templates are parsed up front, so a syntax error surfaces from the
/// constructor rather than from the first render.
pub struct TeraTemplates {
    tera: Tera,
}

impl TeraTemplates {
    /// Load every file under `dir` (recursively, dotfiles skipped).
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let templates = load_templates(dir)?;
        tracing::debug!("loaded {} templates from {}", templates.len(), dir.display());
        Self::from_raw(templates)
    }

    /// Build from `(name, source)` pairs.
    pub fn from_raw<I, N, S>(templates: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        // Later duplicates win, matching directory override order.
        let unique: BTreeMap<String, String> = templates
            .into_iter()
            .map(|(n, s)| (n.into(), s.into()))
            .collect();
        let mut tera = Tera::default();
        tera.add_raw_templates(unique)
            .map_err(|e| TemplateError::Load { message: describe(&e) })?;
        Ok(TeraTemplates { tera })
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

impl TemplateService for TeraTemplates {
    fn compile(&self, name: &str) -> Result<CompiledTemplate, TemplateError> {
        if self.tera.get_template_names().any(|n| n == name) {
            Ok(CompiledTemplate::new(name))
        } else {
            Err(TemplateError::NotFound {
                name: name.to_string(),
            })
        }
    }

    fn render(
        &self,
        template: &CompiledTemplate,
        ctx: &RenderContext<'_>,
    ) -> Result<Vec<u8>, TemplateError> {
        let render_err = |e: tera::Error| TemplateError::Render {
            name: template.name().to_string(),
            message: describe(&e),
        };
        let tera_ctx = ctx.to_tera_context().map_err(render_err)?;
        let output = self
            .tera
            .render(template.name(), &tera_ctx)
            .map_err(render_err)?;
        Ok(output.into_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
