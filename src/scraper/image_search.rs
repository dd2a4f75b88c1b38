// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image search provider for the scraping tool
//!
//! DuckDuckGo's HTML interface needs no API key; the markup it returns is
//! not a contract, so extraction is best-effort and a provider trait keeps
//! the engine swappable.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
const SEARCH_TIMEOUT_SECS: u64 = 10;

const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Errors from an image search provider
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Search timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Trait for finding one illustration URL per subject
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    /// Return the first plausible image URL for the subject, or `None`
    /// when the result page contains nothing usable
    async fn find_image_url(&self, subject: &str) -> Result<Option<String>, SearchError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// DuckDuckGo HTML-interface provider (no API key required)
pub struct DuckDuckGoImages {
    client: Client,
}

impl DuckDuckGoImages {
    pub fn new() -> anyhow::Result<Self> {
        // realistic browser User-Agent to avoid being blocked
        let client = Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSearchProvider for DuckDuckGoImages {
    async fn find_image_url(&self, subject: &str) -> Result<Option<String>, SearchError> {
        let query = format!("{} medicinal plant image", subject);

        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: SEARCH_TIMEOUT_SECS * 1000,
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "search request failed".to_string(),
            });
        }

        let html = response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })?;

        Ok(first_image_url(&html))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Pull the first plausible image URL out of a search result page:
/// an `<img src="http...">` first, then any link to an image file
pub fn first_image_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let img = Selector::parse("img").ok()?;
    for element in document.select(&img) {
        if let Some(src) = element.value().attr("src") {
            if src.starts_with("http") {
                return Some(src.to_string());
            }
        }
    }

    let anchor = Selector::parse("a").ok()?;
    for element in document.select(&anchor) {
        if let Some(href) = element.value().attr("href") {
            let lower = href.to_lowercase();
            if href.starts_with("http") && IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(*ext))
            {
                return Some(href.to_string());
            }
        }
    }

    None
}
