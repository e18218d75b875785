// src/services/board.rs

//! HTTP implementation of [`NoticeSource`] for the configured board.

use async_trait::async_trait;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, NoticeRecord, NoticeSummary};
use crate::services::detail::{self, DetailSelectors};
use crate::services::list::{self, ListSelectors};
use crate::services::NoticeSource;
use crate::utils::http;

/// Client for the one configured notice board.
pub struct BoardClient {
    client: reqwest::Client,
    list_url: Url,
    category: String,
    list_selectors: ListSelectors,
    detail_selectors: DetailSelectors,
}

impl BoardClient {
    /// Create a new board client from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(&config.crawler)?,
            list_url: Url::parse(&config.source.list_url)?,
            category: config.source.category.clone(),
            list_selectors: ListSelectors::from_config(&config.selectors)?,
            detail_selectors: DetailSelectors::from_config(&config.selectors)?,
        })
    }
}

#[async_trait]
impl NoticeSource for BoardClient {
    async fn fetch_list(&self) -> Result<Vec<NoticeSummary>> {
        let document = http::fetch_page(&self.client, self.list_url.as_str()).await?;
        Ok(list::parse_list(
            &document,
            &self.list_selectors,
            &self.list_url,
            &self.category,
        ))
    }

    async fn fetch_detail(&self, summary: &NoticeSummary) -> Result<NoticeRecord> {
        let url = summary
            .source_url
            .as_deref()
            .ok_or_else(|| AppError::validation("summary has no detail link"))?;
        let document = http::fetch_page(&self.client, url).await?;
        detail::parse_detail(&document, summary, &self.detail_selectors)
    }
}
