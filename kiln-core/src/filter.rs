//! Published-only selection used for list and tag pages.

use crate::types::ContentRecord;

/// Picks the records that may appear on generated listing pages.
pub trait ContentFilter {
    /// Order-preserving subsequence of `records`.
    fn select_published(&self, records: &[ContentRecord]) -> Vec<ContentRecord>;
}

/// Keeps records whose `status` is exactly `published`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishedFilter;

impl ContentFilter for PublishedFilter {
    fn select_published(&self, records: &[ContentRecord]) -> Vec<ContentRecord> {
        select_published(records)
    }
}

/// [`PublishedFilter`] as a free function.
pub fn select_published(records: &[ContentRecord]) -> Vec<ContentRecord> {
    records
        .iter()
        .filter(|r| r.is_published())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: &str) -> ContentRecord {
        ContentRecord::new().with("id", id).with("status", status)
    }

    #[test]
    fn keeps_published_in_original_order() {
        let records = vec![
            record("1", "published"),
            record("2", "draft"),
            record("3", "published"),
            record("4", "unknown"),
        ];
        let ids: Vec<String> = PublishedFilter
            .select_published(&records)
            .iter()
            .filter_map(|r| r.get_str("id").map(str::to_string))
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(select_published(&[]).is_empty());
    }
}
