// src/pipeline/poll.rs

//! Poll orchestrator.
//!
//! One cycle runs Listing → Filtering → Dispatching: fetch the list page,
//! drop already-stored summaries, then fan out an independent
//! fetch-detail-and-insert unit per surviving summary. Units run
//! concurrently with no ordering guarantee; one unit's failure never
//! affects its siblings or the next cycle.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::MissedTickBehavior;

use crate::error::{AppError, Result};
use crate::models::NoticeSummary;
use crate::pipeline::dedup;
use crate::services::NoticeSource;
use crate::storage::Database;

/// Counters for one poll cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Entries found on the list page
    pub listed: usize,
    /// Entries that passed the dedup gate and were dispatched
    pub dispatched: usize,
    /// Units that fetched and committed successfully
    pub ingested: usize,
    /// Units that failed (network, parse, or storage)
    pub failed: usize,
}

/// Scheduled entry point of the pipeline.
pub struct Poller {
    source: Arc<dyn NoticeSource>,
    db: Database,
    category: String,
    max_concurrent: usize,
}

impl Poller {
    pub fn new(
        source: Arc<dyn NoticeSource>,
        db: Database,
        category: impl Into<String>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            source,
            db,
            category: category.into(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Run one poll cycle.
    ///
    /// A listing or filtering failure aborts the whole cycle with nothing
    /// dispatched and no partial state kept; the next scheduled cycle
    /// retries from scratch. Dispatched units fail individually.
    pub async fn run_cycle(&self) -> Result<CycleOutcome> {
        let summaries = self.source.fetch_list().await?;
        log::debug!("Listed {} entries from the board", summaries.len());

        let fresh = dedup::filter_new(&self.db, &summaries, &self.category).await?;

        let mut outcome = CycleOutcome {
            listed: summaries.len(),
            dispatched: fresh.len(),
            ..CycleOutcome::default()
        };

        let mut units = stream::iter(fresh)
            .map(|summary| {
                let source = Arc::clone(&self.source);
                let db = self.db.clone();
                async move {
                    let result = process_summary(source.as_ref(), &db, &summary).await;
                    (summary, result)
                }
            })
            .buffer_unordered(self.max_concurrent);

        while let Some((summary, result)) = units.next().await {
            match result {
                Ok(()) => outcome.ingested += 1,
                Err(error) => {
                    outcome.failed += 1;
                    log::warn!(
                        "Failed to ingest notice {} ({}): {}",
                        summary.post_id.as_deref().unwrap_or("?"),
                        summary.source_url.as_deref().unwrap_or("no url"),
                        error
                    );
                }
            }
        }

        Ok(outcome)
    }
}

/// Process one summary: fetch its detail page, then insert the record.
///
/// This is the self-contained unit of dispatched work; it is safe to run
/// concurrently with any number of sibling units.
pub async fn process_summary(
    source: &dyn NoticeSource,
    db: &Database,
    summary: &NoticeSummary,
) -> Result<()> {
    if !summary.is_fetchable() {
        return Err(AppError::validation("summary has no post id or link"));
    }

    let record = source.fetch_detail(summary).await?;
    db.insert(&record).await
}

/// Poll on a fixed interval until interrupted.
///
/// Cycle failures are logged and absorbed; undelivered items stay absent
/// from the store and are re-offered by the dedup gate next time.
pub async fn run_loop(poller: &Poller, period: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match poller.run_cycle().await {
                    Ok(outcome) => log::info!(
                        "Poll cycle complete: {} listed, {} new, {} ingested, {} failed",
                        outcome.listed,
                        outcome.dispatched,
                        outcome.ingested,
                        outcome.failed
                    ),
                    Err(error) => log::warn!("Poll cycle aborted: {}", error),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
