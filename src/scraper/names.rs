// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Plant-name extraction from a source PDF
//!
//! The dictionary PDF lists one plant per line; candidates are the
//! non-empty trimmed lines, deduplicated in first-seen order. Lines that
//! are obviously not names (page numbers, very long passages) are dropped.

use std::collections::HashSet;
use std::path::Path;

use super::ScrapeError;

/// Longest line still considered a plant name
const MAX_NAME_CHARS: usize = 60;

/// Extract candidate plant names from a PDF
pub fn extract_plant_names(pdf_path: &Path) -> Result<Vec<String>, ScrapeError> {
    let text = pdf_extract::extract_text(pdf_path).map_err(|e| ScrapeError::PdfRead {
        path: pdf_path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(candidate_names(&text))
}

/// Split text into candidate names: one per non-empty line, deduplicated,
/// order-preserving
pub fn candidate_names(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || !looks_like_name(line) {
            continue;
        }
        if seen.insert(line.to_lowercase()) {
            names.push(line.to_string());
        }
    }

    names
}

fn looks_like_name(line: &str) -> bool {
    let chars = line.chars().count();
    if chars < 2 || chars > MAX_NAME_CHARS {
        return false;
    }

    // page numbers and table rows are digit-heavy; names are not
    let digits = line.chars().filter(|c| c.is_ascii_digit()).count();
    if digits * 2 >= chars {
        return false;
    }

    line.chars().any(|c| c.is_alphabetic())
}

/// Turn a plant name into a safe file stem: whitespace becomes `_`,
/// anything outside alphanumerics/`-`/`_` is dropped
pub fn sanitize_file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
