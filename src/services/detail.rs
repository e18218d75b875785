// src/services/detail.rs

//! Detail-page parsing.
//!
//! Extracts the full notice record from a fixed detail-page structure:
//! a title element, one meta row holding (date, department, author) cells
//! in that column order, and a body content region.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{NoticeRecord, NoticeSummary, SelectorConfig};
use crate::services::parse_selector;
use crate::utils::time;

/// Parsed selectors for the detail page.
pub(crate) struct DetailSelectors {
    pub title: Selector,
    pub meta_row: Selector,
    pub meta_cell: Selector,
    pub body: Selector,
}

impl DetailSelectors {
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            title: parse_selector(&config.detail_title)?,
            meta_row: parse_selector(&config.detail_meta_row)?,
            meta_cell: parse_selector(&config.detail_meta_cell)?,
            body: parse_selector(&config.detail_body)?,
        })
    }
}

/// Extract the full record for a summary from its detail-page markup.
///
/// `find_at` is stamped here, at the moment of successful extraction.
pub(crate) fn parse_detail(
    document: &Html,
    summary: &NoticeSummary,
    selectors: &DetailSelectors,
) -> Result<NoticeRecord> {
    let post_id = summary
        .post_id
        .clone()
        .ok_or_else(|| AppError::validation("summary has no post id"))?;
    let url = summary
        .source_url
        .clone()
        .ok_or_else(|| AppError::validation("summary has no detail link"))?;

    let title_elem = document
        .select(&selectors.title)
        .next()
        .ok_or_else(|| AppError::parse("detail page", "title element not found"))?;
    let title = collect_text(&title_elem);

    let meta_row = document
        .select(&selectors.meta_row)
        .next()
        .ok_or_else(|| AppError::parse("detail page", "meta row not found"))?;
    let cells: Vec<String> = meta_row
        .select(&selectors.meta_cell)
        .map(|cell| collect_text(&cell))
        .collect();
    if cells.len() < 3 {
        return Err(AppError::parse(
            "detail page",
            format!("expected (date, department, author) cells, found {}", cells.len()),
        ));
    }

    let body_elem = document
        .select(&selectors.body)
        .next()
        .ok_or_else(|| AppError::parse("detail page", "content region not found"))?;
    let text = normalize_body(&body_elem.text().collect::<String>());

    let date = time::parse_site_date(&cells[0])?;

    Ok(NoticeRecord {
        post_id,
        title,
        department: cells[1].clone(),
        author: cells[2].clone(),
        text,
        date,
        find_at: time::now(false),
        url,
        category: summary.category.clone(),
        important: summary.important,
    })
}

fn collect_text(element: &scraper::ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Replace non-breaking spaces with ordinary spaces and trim.
fn normalize_body(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}
