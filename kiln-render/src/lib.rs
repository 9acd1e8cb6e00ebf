//! # kiln-render
//!
//! Render engine and file sink for kiln.
//!
//! Build a [`Renderer`] from a template service and a [`kiln_core::SiteConfig`],
//! then call its `render_*` operations, or hand a list of records to
//! [`pipeline::bake`] to render a whole site.

pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod writer;

pub use error::RenderError;
pub use pipeline::{bake, BakeReport, Outcome};
pub use renderer::{Renderer, TagOutcome};
