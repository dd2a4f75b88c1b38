// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch orchestration of the scraping run
//!
//! Item failures (search down, dead link, not actually an image) are
//! logged and skipped; only failing to read the source PDF halts the run.

use reqwest::Client;
use std::path::Path;
use tracing::{info, warn};

use super::download::download_image;
use super::image_search::ImageSearchProvider;
use super::names::extract_plant_names;
use super::ScrapeError;

/// Outcome counts for one scraping run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Candidate names extracted from the PDF
    pub names: usize,
    /// Images downloaded successfully
    pub downloaded: usize,
    /// Names for which the search returned nothing usable
    pub skipped_no_image: usize,
    /// Names whose search or download failed
    pub failed: usize,
}

/// Scrape one image per plant name found in the PDF
pub async fn scrape_images_from_pdf(
    provider: &dyn ImageSearchProvider,
    client: &Client,
    pdf_path: &Path,
    out_dir: &Path,
    limit: Option<usize>,
) -> Result<ScrapeReport, ScrapeError> {
    let mut names = extract_plant_names(pdf_path)?;
    if let Some(limit) = limit {
        names.truncate(limit);
    }

    let mut report = ScrapeReport {
        names: names.len(),
        ..ScrapeReport::default()
    };

    for name in &names {
        info!(plant = %name, provider = provider.name(), "scraping image");

        let url = match provider.find_image_url(name).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                info!(plant = %name, "no image found");
                report.skipped_no_image += 1;
                continue;
            }
            Err(e) => {
                warn!(plant = %name, error = %e, "image search failed, skipping");
                report.failed += 1;
                continue;
            }
        };

        match download_image(client, &url, name, out_dir).await {
            Ok(file) => {
                info!(plant = %name, file = %file.display(), "downloaded");
                report.downloaded += 1;
            }
            Err(e) => {
                warn!(plant = %name, url = %url, error = %e, "download failed, skipping");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
