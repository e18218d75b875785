// src/models/mod.rs

//! Domain models for the poller application.

mod config;
mod notice;

// Re-export all public types
pub use config::{Config, CrawlerConfig, DatabaseConfig, SelectorConfig, SourceConfig};
pub use notice::{NoticeRecord, NoticeSummary};
