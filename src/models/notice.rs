//! Notice data structures.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Lightweight listing-page representation of a notice, prior to full
/// content retrieval.
///
/// Rows without a recognizable link still produce a summary with `None`
/// fields; such entries cannot be deduplicated or fetched and are dropped
/// downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeSummary {
    /// Absolute URL to the detail page
    pub source_url: Option<String>,

    /// Site-assigned identifier, unique within a category
    pub post_id: Option<String>,

    /// Whether the entry is pinned/highlighted on the list page
    pub important: bool,

    /// Classification tag of the configured source
    pub category: String,
}

impl NoticeSummary {
    /// A summary can enter the dedup/fetch path only with an identifier
    /// and a link.
    pub fn is_fetchable(&self) -> bool {
        matches!(&self.post_id, Some(id) if !id.is_empty()) && self.source_url.is_some()
    }
}

/// Fully parsed notice, the unit of storage.
///
/// Created exactly once after a successful detail fetch; never updated or
/// deleted by this system. The surrogate row id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeRecord {
    /// Site-assigned identifier (carried from the summary)
    pub post_id: String,

    /// Notice title
    pub title: String,

    /// Publishing department
    pub department: String,

    /// Author name
    pub author: String,

    /// Body text
    pub text: String,

    /// The notice's own published date, regional zone at midnight
    pub date: DateTime<FixedOffset>,

    /// When this system first captured the notice, regional zone
    pub find_at: DateTime<FixedOffset>,

    /// Full URL to the notice
    pub url: String,

    /// Classification tag of the configured source
    pub category: String,

    /// Pinned/highlighted flag carried from the summary
    pub important: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> NoticeSummary {
        NoticeSummary {
            source_url: Some("https://cs.example.ac.kr/board/view?no=124".to_string()),
            post_id: Some("124".to_string()),
            important: false,
            category: "cs".to_string(),
        }
    }

    #[test]
    fn test_fetchable_with_id_and_url() {
        assert!(sample_summary().is_fetchable());
    }

    #[test]
    fn test_not_fetchable_without_id() {
        let mut summary = sample_summary();
        summary.post_id = None;
        assert!(!summary.is_fetchable());

        summary.post_id = Some(String::new());
        assert!(!summary.is_fetchable());
    }

    #[test]
    fn test_not_fetchable_without_url() {
        let mut summary = sample_summary();
        summary.source_url = None;
        assert!(!summary.is_fetchable());
    }
}
