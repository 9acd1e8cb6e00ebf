//! Output path resolution.
//!
//! # Layout
//!
//! ```text
//! <source>/content/blog/post1.md  ──►  <destination>/blog/post1.html        (published)
//!                                 ──►  <destination>/blog/post1-draft.html  (draft)
//! ```
//!
//! Both names are derived from the same base so the renderer can remove the
//! sibling left over from a previous build with the other status.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::ContentError;
use crate::types::Status;

/// Directory under the source root that mirrors onto the destination root.
pub const CONTENT_DIR: &str = "content";
pub const DRAFT_SUFFIX: &str = "-draft";
pub const OUTPUT_EXTENSION: &str = "html";

/// Resolved destination for one content record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Destination path without extension or draft suffix.
    base: PathBuf,
    status: Status,
}

impl OutputTarget {
    /// The file this render writes.
    pub fn path(&self) -> PathBuf {
        self.path_for(self.status)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_draft(&self) -> bool {
        self.status == Status::Draft
    }

    /// `<base>.html`
    pub fn published_path(&self) -> PathBuf {
        self.path_for(Status::Published)
    }

    /// `<base>-draft.html`
    pub fn draft_path(&self) -> PathBuf {
        self.path_for(Status::Draft)
    }

    /// Both candidate outputs, draft first.
    pub fn siblings(&self) -> [PathBuf; 2] {
        [self.draft_path(), self.published_path()]
    }

    fn path_for(&self, status: Status) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        if status == Status::Draft {
            name.push(DRAFT_SUFFIX);
        }
        name.push(".");
        name.push(OUTPUT_EXTENSION);
        PathBuf::from(name)
    }
}

/// Map a source file to its destination.
///
/// `file` must live under `<source_root>/content`; the remainder of the path
/// is mirrored under `destination_root` with the extension swapped for
/// `.html` (and `-draft` inserted for drafts).
///
/// Returns [`ContentError::PathResolution`] when `file` is outside the content
/// root (including paths that climb back out through `..`) and [`ContentError::InvalidContentPath`] when its name has no
/// extension.
pub fn resolve_output(
    file: &Path,
    source_root: &Path,
    destination_root: &Path,
    status: Status,
) -> Result<OutputTarget, ContentError> {
    let content_root = source_root.join(CONTENT_DIR);
    let outside = || ContentError::PathResolution {
        path: file.to_path_buf(),
        content_root: content_root.clone(),
    };
    let relative = file.strip_prefix(&content_root).map_err(|_| outside())?;
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(outside());
    }

    let stem = match (relative.file_stem(), relative.extension()) {
        (Some(stem), Some(_)) => stem,
        _ => {
            return Err(ContentError::InvalidContentPath {
                path: file.to_path_buf(),
            })
        }
    };

    Ok(OutputTarget {
        base: destination_root.join(relative.with_file_name(stem)),
        status,
    })
}

/// File-system name for a tag: trimmed, inner spaces replaced by `-`.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().replace(' ', "-")
}

/// `<destination>/<tag_dir>/<normalized tag>.html`
///
/// Fails with [`ContentError::InvalidTag`] unless the file name is a single
/// plain component, so a tag can never escape `<tag_dir>`.
pub fn tag_output_path(
    destination_root: &Path,
    tag_dir: &str,
    tag: &str,
) -> Result<PathBuf, ContentError> {
    let file_name = format!("{}.{OUTPUT_EXTENSION}", normalize_tag(tag));
    let mut components = Path::new(&file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(destination_root.join(tag_dir).join(file_name)),
        _ => Err(ContentError::InvalidTag {
            tag: tag.to_string(),
        }),
    }
}
