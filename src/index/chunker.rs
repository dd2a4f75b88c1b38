// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Overlapping fixed-window text splitter
//!
//! Documents are segmented into character windows with a fixed overlap so
//! that passages spanning a window boundary still appear intact in at least
//! one chunk. Offsets are in characters, not bytes, so multi-byte scripts in
//! the monographs split safely.

use super::errors::IndexError;

/// A bounded text span extracted from a source document.
///
/// Immutable once created; owned exclusively by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChunk {
    /// The chunk text
    pub text: String,
    /// Source document identifier (file name)
    pub source: String,
    /// Start offset in the source, in characters
    pub start: usize,
    /// End offset (exclusive) in the source, in characters
    pub end: usize,
}

/// Splits text into overlapping fixed-size windows
#[derive(Debug, Clone)]
pub struct TextSplitter {
    window: usize,
    overlap: usize,
}

impl TextSplitter {
    /// Create a splitter.
    ///
    /// # Errors
    ///
    /// `overlap` must be strictly smaller than `window`, and `window` must be
    /// non-zero; otherwise splitting would never advance.
    pub fn new(window: usize, overlap: usize) -> Result<Self, IndexError> {
        if window == 0 {
            return Err(IndexError::InvalidChunking(
                "window size must be non-zero".to_string(),
            ));
        }
        if overlap >= window {
            return Err(IndexError::InvalidChunking(format!(
                "overlap ({}) must be smaller than window ({})",
                overlap, window
            )));
        }
        Ok(Self { window, overlap })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into overlapping windows.
    ///
    /// Consecutive chunks advance by `window - overlap` characters, so
    /// reassembling them in order reproduces an overlapping, order-preserving
    /// cover of the original text with no gaps. Empty text yields no chunks.
    pub fn split(&self, source: &str, text: &str) -> Vec<DocumentChunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.window - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.window).min(chars.len());
            chunks.push(DocumentChunk {
                text: chars[start..end].iter().collect(),
                source: source.to_string(),
                start,
                end,
            });

            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}
