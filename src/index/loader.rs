// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PDF document loading
//!
//! Loads every `*.pdf` in a directory, in lexicographic file-name order so
//! the "first N documents" cap is deterministic. Files that fail to parse
//! are logged and skipped; only a directory with zero parsable documents is
//! an error (reported by the builder, not here).

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::errors::IndexError;

/// A document's extracted text plus its identifier
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Source identifier (file name)
    pub name: String,
    /// Full extracted text
    pub text: String,
}

/// Seam for document sources, so the builder can be exercised without
/// real PDF fixtures
pub trait DocumentSource: Send + Sync {
    /// Load all documents, in stable order
    fn load(&self) -> Result<Vec<LoadedDocument>, IndexError>;

    /// Human-readable origin for error messages
    fn origin(&self) -> String;
}

/// Loads PDFs from a fixed directory
pub struct PdfDirectoryLoader {
    directory: PathBuf,
}

impl PdfDirectoryLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn pdf_paths(&self) -> Result<Vec<PathBuf>, IndexError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.directory)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
            })
            .collect();

        // lexicographic order keeps the document cap deterministic
        paths.sort();
        Ok(paths)
    }
}

impl DocumentSource for PdfDirectoryLoader {
    fn load(&self) -> Result<Vec<LoadedDocument>, IndexError> {
        let mut documents = Vec::new();

        for path in self.pdf_paths()? {
            match pdf_extract::extract_text(&path) {
                Ok(text) => {
                    debug!(file = %path.display(), chars = text.len(), "loaded document");
                    documents.push(LoadedDocument {
                        name: file_name_of(&path),
                        text,
                    });
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unparsable PDF");
                }
            }
        }

        Ok(documents)
    }

    fn origin(&self) -> String {
        self.directory.display().to_string()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Fixed in-memory document source, used by tests and tooling
pub struct StaticDocumentSource {
    documents: Vec<LoadedDocument>,
}

impl StaticDocumentSource {
    pub fn new(documents: Vec<(&str, &str)>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|(name, text)| LoadedDocument {
                    name: name.to_string(),
                    text: text.to_string(),
                })
                .collect(),
        }
    }
}

impl DocumentSource for StaticDocumentSource {
    fn load(&self) -> Result<Vec<LoadedDocument>, IndexError> {
        Ok(self.documents.clone())
    }

    fn origin(&self) -> String {
        "in-memory".to_string()
    }
}
