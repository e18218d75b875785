//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The one configured board source
    pub source: SourceConfig,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Persistence store settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// CSS selector contract of the source site
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.list_url.trim().is_empty() {
            return Err(AppError::validation("source.list_url is empty"));
        }
        if self.source.category.trim().is_empty() {
            return Err(AppError::validation("source.category is empty"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.poll_interval_secs == 0 {
            return Err(AppError::validation(
                "crawler.poll_interval_secs must be > 0",
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::validation("database.url is empty"));
        }
        Ok(())
    }
}

/// The single list endpoint this poller watches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the notice-list page
    pub list_url: String,

    /// Category tag stored with every record from this source; part of
    /// the dedup key
    pub category: String,
}

/// HTTP client and polling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent detail-fetch units per cycle
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Seconds between poll cycles
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            poll_interval_secs: defaults::poll_interval(),
        }
    }
}

/// Persistence store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default = "defaults::database_url")]
    pub url: String,

    /// Maximum pooled connections
    #[serde(default = "defaults::max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::database_url(),
            max_connections: defaults::max_connections(),
        }
    }
}

/// CSS selectors for the source site's list and detail pages.
///
/// These are the fixed external contract of the scraping adapter; element
/// and class names are configuration, not core logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Selector for each row in the notice list
    #[serde(default = "defaults::list_row")]
    pub list_row: String,

    /// Selector for the link element within a row
    #[serde(default = "defaults::list_link")]
    pub list_link: String,

    /// Class on the row container marking a pinned/highlighted entry
    #[serde(default = "defaults::important_class")]
    pub important_class: String,

    /// Selector for the title element on the detail page
    #[serde(default = "defaults::detail_title")]
    pub detail_title: String,

    /// Selector for the detail-page row holding (date, department, author)
    /// cells in that fixed column order
    #[serde(default = "defaults::detail_meta_row")]
    pub detail_meta_row: String,

    /// Selector for the cells within the meta row
    #[serde(default = "defaults::detail_meta_cell")]
    pub detail_meta_cell: String,

    /// Selector for the body content region on the detail page
    #[serde(default = "defaults::detail_body")]
    pub detail_body: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            list_row: defaults::list_row(),
            list_link: defaults::list_link(),
            important_class: defaults::important_class(),
            detail_title: defaults::detail_title(),
            detail_meta_row: defaults::detail_meta_row(),
            detail_meta_cell: defaults::detail_meta_cell(),
            detail_body: defaults::detail_body(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; notipoll/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        5
    }
    pub fn poll_interval() -> u64 {
        60
    }

    // Database defaults
    pub fn database_url() -> String {
        "sqlite://notipoll.db".into()
    }
    pub fn max_connections() -> u32 {
        5
    }

    // Selector defaults for the standard table-based board layout
    pub fn list_row() -> String {
        "table.board_list tbody tr".into()
    }
    pub fn list_link() -> String {
        "td.subject a".into()
    }
    pub fn important_class() -> String {
        "notice".into()
    }
    pub fn detail_title() -> String {
        "div.board_view .title".into()
    }
    pub fn detail_meta_row() -> String {
        "div.board_view table.info tr".into()
    }
    pub fn detail_meta_cell() -> String {
        "td".into()
    }
    pub fn detail_body() -> String {
        "div.board_view .content".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            source: SourceConfig {
                list_url: "https://cs.example.ac.kr/board/notice".to_string(),
                category: "cs".to_string(),
            },
            crawler: CrawlerConfig::default(),
            database: DatabaseConfig::default(),
            selectors: SelectorConfig::default(),
        }
    }

    #[test]
    fn validate_sample_config_ok() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_list_url() {
        let mut config = sample_config();
        config.source.list_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_category() {
        let mut config = sample_config();
        config.source.category = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = sample_config();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [source]
            list_url = "https://cs.example.ac.kr/board/notice"
            category = "cs"
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.poll_interval_secs, 60);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.selectors.important_class, "notice");
        assert!(config.validate().is_ok());
    }
}
