//! Service layer for the poller application.
//!
//! This module contains the source-site access logic:
//! - List-page retrieval and parsing (`list`)
//! - Detail-page retrieval and parsing (`detail`)
//! - The HTTP client tying both together (`BoardClient`)

mod board;
mod detail;
mod list;

pub use board::BoardClient;

use async_trait::async_trait;
use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::{NoticeRecord, NoticeSummary};

/// Access seam to the source site, implemented over HTTP by [`BoardClient`].
///
/// The poll orchestrator works against this trait so cycle behavior can be
/// exercised without a live board.
#[async_trait]
pub trait NoticeSource: Send + Sync {
    /// Retrieve the list page and extract one summary per listed notice.
    async fn fetch_list(&self) -> Result<Vec<NoticeSummary>>;

    /// Retrieve a notice's detail page and extract the full record.
    async fn fetch_detail(&self, summary: &NoticeSummary) -> Result<NoticeRecord>;
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
