//! # kiln-templates
//!
//! Template service used by the kiln renderer: a narrow
//! compile-by-name / render-to-bytes seam ([`TemplateService`]) and a
//! Tera-backed implementation loaded from a template directory.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use kiln_core::ContentRecord;
//! use kiln_templates::{RenderContext, TemplateService, TeraTemplates};
//!
//! fn render_one(record: &ContentRecord) -> Result<Vec<u8>, kiln_templates::TemplateError> {
//!     let templates = TeraTemplates::from_dir(Path::new("site/templates"))?;
//!     let post = templates.compile("post.ftl")?;
//!     templates.render(&post, &RenderContext::for_content("1.0.0", record))
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::RenderContext;
pub use engine::{CompiledTemplate, TemplateService, TeraTemplates};
pub use error::TemplateError;
