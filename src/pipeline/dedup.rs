// src/pipeline/dedup.rs

//! Dedup gate: filters out summaries whose `(post_id, category)` pair is
//! already stored.

use crate::error::Result;
use crate::models::NoticeSummary;
use crate::storage::Database;

/// Return the summaries not yet present in the store, in input order.
///
/// Each check is an independent read; no lock is taken between the check
/// and a later insert. Overlapping cycles may both see "new" for the same
/// pair — the store's uniqueness constraint settles that race, not this
/// gate. Summaries without a usable identifier cannot be deduplicated and
/// are dropped here.
pub async fn filter_new(
    db: &Database,
    summaries: &[NoticeSummary],
    category: &str,
) -> Result<Vec<NoticeSummary>> {
    let mut fresh = Vec::new();

    for summary in summaries {
        let Some(post_id) = summary.post_id.as_deref().filter(|id| !id.is_empty()) else {
            log::debug!("Skipping list entry without a post id");
            continue;
        };

        if !db.exists(post_id, category).await? {
            fresh.push(summary.clone());
        }
    }

    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeRecord;
    use crate::utils::time;

    fn summary(post_id: Option<&str>) -> NoticeSummary {
        NoticeSummary {
            source_url: post_id
                .map(|id| format!("https://cs.example.ac.kr/board/view?no={id}")),
            post_id: post_id.map(str::to_string),
            important: false,
            category: "cs".to_string(),
        }
    }

    fn record(post_id: &str) -> NoticeRecord {
        NoticeRecord {
            post_id: post_id.to_string(),
            title: "t".to_string(),
            department: "d".to_string(),
            author: "a".to_string(),
            text: "b".to_string(),
            date: time::parse_site_date("25.03.14").unwrap(),
            find_at: time::now(false),
            url: format!("https://cs.example.ac.kr/board/view?no={post_id}"),
            category: "cs".to_string(),
            important: false,
        }
    }

    async fn open_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        db.provision().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_passes_unseen_summaries_in_order() {
        let db = open_db().await;
        let summaries = vec![summary(Some("1")), summary(Some("2"))];

        let fresh = filter_new(&db, &summaries, "cs").await.unwrap();
        assert_eq!(fresh, summaries);
    }

    #[tokio::test]
    async fn test_drops_already_stored_pairs() {
        let db = open_db().await;
        db.insert(&record("123")).await.unwrap();

        let summaries = vec![summary(Some("123")), summary(Some("124"))];
        let fresh = filter_new(&db, &summaries, "cs").await.unwrap();

        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].post_id.as_deref(), Some("124"));
    }

    #[tokio::test]
    async fn test_same_id_other_category_is_new() {
        let db = open_db().await;
        db.insert(&record("123")).await.unwrap();

        let summaries = vec![summary(Some("123"))];
        let fresh = filter_new(&db, &summaries, "math").await.unwrap();
        assert_eq!(fresh.len(), 1);
    }

    #[tokio::test]
    async fn test_drops_summaries_without_ids() {
        let db = open_db().await;
        let summaries = vec![summary(None), summary(Some("")), summary(Some("5"))];

        let fresh = filter_new(&db, &summaries, "cs").await.unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].post_id.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_fully_ingested_batch_yields_nothing() {
        let db = open_db().await;
        for id in ["1", "2", "3"] {
            db.insert(&record(id)).await.unwrap();
        }

        let summaries = vec![summary(Some("1")), summary(Some("2")), summary(Some("3"))];
        let fresh = filter_new(&db, &summaries, "cs").await.unwrap();
        assert!(fresh.is_empty());
    }
}
