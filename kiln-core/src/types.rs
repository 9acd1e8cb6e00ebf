//! Content types handed to the rendering stage by the parser.
//!
//! A [`ContentRecord`] is an open key/value map: only `file`, `type` and
//! `status` carry meaning here, every other key is passed to templates as-is.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ContentError;

pub const FILE_KEY: &str = "file";
pub const TYPE_KEY: &str = "type";
pub const STATUS_KEY: &str = "status";
pub const TAGS_KEY: &str = "tags";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Publication status of a content record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Published,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Draft => write!(f, "draft"),
            Status::Published => write!(f, "published"),
        }
    }
}

impl FromStr for Status {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Status::Draft),
            "published" => Ok(Status::Published),
            other => Err(ContentError::UnknownStatus {
                status: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentRecord
// ---------------------------------------------------------------------------

/// One parsed source document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRecord(pub Map<String, Value>);

impl ContentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Original source path (`file`).
    pub fn file(&self) -> Result<&str, ContentError> {
        self.required(FILE_KEY)
    }

    /// Template selector (`type`).
    pub fn content_type(&self) -> Result<&str, ContentError> {
        self.required(TYPE_KEY)
    }

    /// Parsed `status`.
    pub fn status(&self) -> Result<Status, ContentError> {
        self.required(STATUS_KEY)?.parse()
    }

    /// `true` only for an explicit `published` status.
    pub fn is_published(&self) -> bool {
        matches!(self.status(), Ok(Status::Published))
    }

    /// Tags declared on the record.
    ///
    /// Accepts either a JSON array of strings or a single comma-separated
    /// string. Entries are trimmed; empty entries are dropped.
    pub fn tags(&self) -> Vec<String> {
        let raw: Vec<&str> = match self.0.get(TAGS_KEY) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(s)) => s.split(',').collect(),
            _ => Vec::new(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn required(&self, field: &'static str) -> Result<&str, ContentError> {
        self.get_str(field)
            .ok_or(ContentError::MissingField { field })
    }
}

impl From<Map<String, Value>> for ContentRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// TagIndex
// ---------------------------------------------------------------------------

/// Tag name → records carrying that tag, in record order.
///
/// Keys iterate lexicographically so tag pages are produced in a stable order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagIndex(pub BTreeMap<String, Vec<ContentRecord>>);

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group `records` by each of their [`ContentRecord::tags`].
    pub fn from_records(records: &[ContentRecord]) -> Self {
        let mut index = Self::new();
        for record in records {
            for tag in record.tags() {
                index.push(tag, record.clone());
            }
        }
        index
    }

    /// Append a record under `tag`.
    pub fn push(&mut self, tag: impl Into<String>, record: ContentRecord) {
        self.0.entry(tag.into()).or_default().push(record);
    }

    pub fn get(&self, tag: &str) -> Option<&[ContentRecord]> {
        self.0.get(tag).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<ContentRecord>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<ContentRecord>)> for TagIndex {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ContentRecord>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
