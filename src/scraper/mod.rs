// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Offline image-harvesting tool
//!
//! Reads plant names out of a PDF, queries a web image search per name and
//! downloads the first plausible image into the local herb-image directory.
//! Pure batch job: per-item failures are logged and skipped, and the only
//! runtime handoff to the assistant is the shared image directory.

pub mod batch;
pub mod download;
pub mod image_search;
pub mod names;

pub use batch::{scrape_images_from_pdf, ScrapeReport};
pub use download::download_image;
pub use image_search::{DuckDuckGoImages, ImageSearchProvider, SearchError};
pub use names::{candidate_names, extract_plant_names, sanitize_file_stem};

use thiserror::Error;

use crate::images::ImageError;

/// Errors from the scraping tool
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The input PDF could not be read or parsed
    #[error("Failed to read PDF {path}: {message}")]
    PdfRead { path: String, message: String },

    /// The image search provider failed
    #[error("Image search failed: {0}")]
    Search(#[from] SearchError),

    /// Downloading the image failed
    #[error("Image fetch failed: {message}")]
    Fetch { message: String },

    /// The downloaded body is not a usable image
    #[error("Downloaded data is not a usable image: {0}")]
    NotAnImage(#[from] ImageError),

    /// Filesystem failure writing the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
