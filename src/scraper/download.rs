// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image download and storage

use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::names::sanitize_file_stem;
use super::ScrapeError;
use crate::images::{extension_for, validate_image_bytes};

/// Download `url` and store it as `<sanitized name>.<ext>` under `out_dir`.
///
/// The body must decode as an image; the extension comes from the detected
/// format, not from the URL.
pub async fn download_image(
    client: &Client,
    url: &str,
    name: &str,
    out_dir: &Path,
) -> Result<PathBuf, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::Fetch {
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(ScrapeError::Fetch {
            message: format!("HTTP {}", response.status().as_u16()),
        });
    }

    let bytes = response.bytes().await.map_err(|e| ScrapeError::Fetch {
        message: e.to_string(),
    })?;

    let format = validate_image_bytes(&bytes)?;

    fs::create_dir_all(out_dir)?;
    let file = out_dir.join(format!(
        "{}.{}",
        sanitize_file_stem(name),
        extension_for(format)
    ));
    fs::write(&file, &bytes)?;

    debug!(file = %file.display(), bytes = bytes.len(), "image stored");
    Ok(file)
}
