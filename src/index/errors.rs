// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for document index construction

use thiserror::Error;

use crate::embeddings::EmbeddingError;

/// Errors that can occur while building the document index
#[derive(Debug, Error)]
pub enum IndexError {
    /// The configured directory yielded zero parsable documents
    #[error("No parsable documents found in {directory}")]
    NoDocumentsFound { directory: String },

    /// The embedding service failed; the build is aborted and no partial
    /// index is published
    #[error("Embedding service failed: {0}")]
    EmbeddingService(#[from] EmbeddingError),

    /// The similarity structure could not be constructed from the vectors
    #[error("Failed to build index: {0}")]
    IndexBuild(String),

    /// Splitter misconfiguration (overlap must be smaller than the window)
    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),

    /// Filesystem failure reading the document directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IndexError {
    /// Stable code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            IndexError::NoDocumentsFound { .. } => "NO_DOCUMENTS_FOUND",
            IndexError::EmbeddingService(_) => "EMBEDDING_SERVICE_ERROR",
            IndexError::IndexBuild(_) => "INDEX_BUILD_FAILED",
            IndexError::InvalidChunking(_) => "INVALID_CHUNKING",
            IndexError::Io(_) => "IO_ERROR",
        }
    }
}
