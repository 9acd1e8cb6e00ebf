//! Template context — the serializable payload handed to every template.

use chrono::{DateTime, Utc};
use serde::Serialize;

use kiln_core::ContentRecord;

/// Per-render template context.
///
/// Exactly one of `content` / `posts` is set by the constructors; `version`
/// is always present. Absent optional keys are omitted, not `null`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    /// Build version of the generator.
    pub version: &'a str,
    /// Single record (content pages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a ContentRecord>,
    /// Record list (index, feed, archive, tag pages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<&'a [ContentRecord]>,
    /// Raw tag name as supplied by the caller (tag pages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'a str>,
    /// Feed publication time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<DateTime<Utc>>,
}

impl<'a> RenderContext<'a> {
    pub fn for_content(version: &'a str, content: &'a ContentRecord) -> Self {
        RenderContext {
            version,
            content: Some(content),
            posts: None,
            tag: None,
            pubdate: None,
        }
    }

    pub fn for_posts(version: &'a str, posts: &'a [ContentRecord]) -> Self {
        RenderContext {
            version,
            content: None,
            posts: Some(posts),
            tag: None,
            pubdate: None,
        }
    }

    pub fn with_tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn with_pubdate(mut self, pubdate: DateTime<Utc>) -> Self {
        self.pubdate = Some(pubdate);
        self
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, tera::Error> {
        tera::Context::from_serialize(self)
    }
}
