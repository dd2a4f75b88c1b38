// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Two-stage image resolution: local directory first, web fallback second
//!
//! Stage 1 scans the harvested-image directory for a file whose name
//! contains every token of the subject. Stage 2 asks the language model for
//! an image URL and fetches it. Every failure on the remote path degrades
//! to `NotFound` — a missing illustration must never abort the pipeline.

use anyhow::Result;
use image::ImageFormat;
use regex::Regex;
use reqwest::Client;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::format::{validate_image_bytes, ImageError, MAX_IMAGE_SIZE};
use crate::llm::{ChatClient, ChatError};

const FETCH_TIMEOUT_SECS: u64 = 20;

/// A successfully resolved image
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub origin: ImageOrigin,
}

/// Where a resolved image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    LocalDirectory,
    Web,
}

/// Outcome of image resolution — `NotFound` is an expected, non-fatal result
#[derive(Debug)]
pub enum ImageResolution {
    Found(ResolvedImage),
    NotFound,
}

impl ImageResolution {
    pub fn into_option(self) -> Option<ResolvedImage> {
        match self {
            ImageResolution::Found(image) => Some(image),
            ImageResolution::NotFound => None,
        }
    }
}

/// Failures on the remote fallback path. These are absorbed into
/// `NotFound` by `resolve`; the type exists so the stages stay testable
/// and the absorption is a deliberate choice at one call site.
#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("model call failed: {0}")]
    Chat(#[from] ChatError),

    #[error("model reply contained no usable image URL")]
    NoUrlInReply,

    #[error("image fetch failed: {message}")]
    Fetch { message: String },

    #[error("fetched body is not a usable image: {0}")]
    NotAnImage(#[from] ImageError),
}

/// Resolves a subject name to illustrative image bytes
pub struct ImageResolver {
    directory: PathBuf,
    chat: Arc<dyn ChatClient>,
    http: Client,
    url_pattern: Regex,
}

impl ImageResolver {
    pub fn new(directory: impl Into<PathBuf>, chat: Arc<dyn ChatClient>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        let url_pattern = Regex::new(r#"https?://[^\s"'<>()\[\]]+"#)?;

        Ok(Self {
            directory: directory.into(),
            chat,
            http,
            url_pattern,
        })
    }

    /// Resolve an image for `subject`, trying the local directory first and
    /// the web second. Never errors; both stages failing yields `NotFound`.
    /// No caching — repeated calls re-run both stages.
    pub async fn resolve(&self, subject: &str) -> ImageResolution {
        if let Some(image) = self.lookup_local(subject) {
            return ImageResolution::Found(image);
        }

        match self.fetch_remote(subject).await {
            Ok(image) => ImageResolution::Found(image),
            Err(e) => {
                debug!(subject, error = %e, "remote image fallback failed");
                ImageResolution::NotFound
            }
        }
    }

    /// Stage 1: scan the local directory.
    ///
    /// A file matches when its lowercased name contains every
    /// whitespace-delimited token of the subject. Candidates are visited in
    /// lexicographic filename order so the winner is deterministic when
    /// several files match. Unreadable or non-image winners fall through to
    /// the next candidate.
    fn lookup_local(&self, subject: &str) -> Option<ResolvedImage> {
        let tokens: Vec<String> = subject
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.to_string())
            .collect();
        if tokens.is_empty() {
            return None;
        }

        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(directory = %self.directory.display(), error = %e, "herb image directory unreadable");
                return None;
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        candidates.sort();

        for path in candidates {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if !tokens.iter().all(|t| name.contains(t.as_str())) {
                continue;
            }

            match fs::read(&path) {
                Ok(bytes) => match validate_image_bytes(&bytes) {
                    Ok(format) => {
                        debug!(file = %path.display(), "matched local herb image");
                        return Some(ResolvedImage {
                            bytes,
                            format,
                            origin: ImageOrigin::LocalDirectory,
                        });
                    }
                    Err(e) => {
                        warn!(file = %path.display(), error = %e, "matching file is not a usable image");
                    }
                },
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "failed to read matching image file");
                }
            }
        }

        None
    }

    /// Stage 2: ask the model for an image URL and fetch it
    async fn fetch_remote(&self, subject: &str) -> Result<ResolvedImage, RemoteFetchError> {
        let prompt = format!(
            "Find a clear image of the herb called {} and provide the link to the image.",
            subject
        );
        let reply = self.chat.complete(&prompt).await?;

        let url = self
            .extract_url(&reply)
            .ok_or(RemoteFetchError::NoUrlInReply)?;

        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| RemoteFetchError::Fetch {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RemoteFetchError::Fetch {
                message: format!("HTTP {}", response.status().as_u16()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteFetchError::Fetch {
                message: e.to_string(),
            })?;
        if bytes.len() > MAX_IMAGE_SIZE {
            return Err(RemoteFetchError::NotAnImage(ImageError::TooLarge(
                bytes.len(),
                MAX_IMAGE_SIZE,
            )));
        }

        let bytes = bytes.to_vec();
        let format = validate_image_bytes(&bytes)?;

        debug!(subject, url = %url, "fetched herb image from the web");
        Ok(ResolvedImage {
            bytes,
            format,
            origin: ImageOrigin::Web,
        })
    }

    /// Extract the first http(s) URL from free model text
    fn extract_url(&self, reply: &str) -> Option<Url> {
        let raw = self.url_pattern.find(reply)?.as_str();
        let trimmed = raw.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        Url::parse(trimmed).ok()
    }
}
