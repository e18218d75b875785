// src/services/list.rs

//! List-page parsing.
//!
//! Turns the notice-list markup into lightweight summaries. A row without a
//! recognizable link still yields a summary with empty fields rather than
//! aborting the batch; callers discard such entries.

use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::{NoticeSummary, SelectorConfig};
use crate::services::parse_selector;
use crate::utils::{extract_post_id, resolve_url};

/// Parsed selectors for the list page.
pub(crate) struct ListSelectors {
    pub row: Selector,
    pub link: Selector,
    pub important_class: String,
}

impl ListSelectors {
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            row: parse_selector(&config.list_row)?,
            link: parse_selector(&config.list_link)?,
            important_class: config.important_class.clone(),
        })
    }
}

/// Extract one summary per list row, in the page's display order.
pub(crate) fn parse_list(
    document: &Html,
    selectors: &ListSelectors,
    base_url: &Url,
    category: &str,
) -> Vec<NoticeSummary> {
    let mut summaries = Vec::new();

    for row in document.select(&selectors.row) {
        let important = row
            .value()
            .classes()
            .any(|c| c == selectors.important_class);

        let href = row
            .select(&selectors.link)
            .next()
            .and_then(|link| link.value().attr("href"));

        let (source_url, post_id) = match href {
            Some(href) => {
                let url = resolve_url(base_url, href);
                let post_id = extract_post_id(&url);
                (Some(url), post_id)
            }
            None => (None, None),
        };

        summaries.push(NoticeSummary {
            source_url,
            post_id,
            important,
            category: category.to_string(),
        });
    }

    summaries
}
