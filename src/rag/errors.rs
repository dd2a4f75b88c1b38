// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the retrieval-augmented answer pipeline
//!
//! Index-build and model failures are fatal for the current interaction and
//! must be surfaced to the user; a missing illustration is not an error at
//! all — the resolver reports it as a `NotFound` outcome instead.

use thiserror::Error;

use crate::embeddings::EmbeddingError;
use crate::index::IndexError;
use crate::llm::ChatError;

/// Errors that can occur while producing a grounded answer
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The document directory yielded zero parsable documents
    #[error("No parsable documents found in {directory}")]
    NoDocumentsFound { directory: String },

    /// The external embedding service failed
    #[error("Embedding service failed: {message}")]
    EmbeddingService { message: String },

    /// The language-model service could not be reached (network/auth)
    #[error("Model unavailable: {message}")]
    ModelUnavailable { message: String },

    /// The language-model call exceeded its response-time budget
    #[error("Model timeout after {timeout_ms}ms")]
    ModelTimeout { timeout_ms: u64 },

    /// Index construction failed for a non-embedding reason
    #[error("Failed to build index: {message}")]
    IndexBuild { message: String },
}

impl PipelineError {
    /// Stable code for logging and API error responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::NoDocumentsFound { .. } => "NO_DOCUMENTS_FOUND",
            PipelineError::EmbeddingService { .. } => "EMBEDDING_SERVICE_ERROR",
            PipelineError::ModelUnavailable { .. } => "MODEL_UNAVAILABLE",
            PipelineError::ModelTimeout { .. } => "MODEL_TIMEOUT",
            PipelineError::IndexBuild { .. } => "INDEX_BUILD_FAILED",
        }
    }

    /// User-facing message for chat/API surfaces
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::NoDocumentsFound { .. } => {
                "No plant documents are available to answer from. Add PDFs to the dataset directory and rebuild the index.".to_string()
            }
            PipelineError::EmbeddingService { .. } => {
                "The embedding service is not responding; the document index cannot be built right now.".to_string()
            }
            PipelineError::ModelUnavailable { .. } => {
                "The language model is unavailable; please try again.".to_string()
            }
            PipelineError::ModelTimeout { .. } => {
                "The language model took too long to answer; please try again.".to_string()
            }
            PipelineError::IndexBuild { .. } => {
                "The document index could not be built.".to_string()
            }
        }
    }

    /// Whether this error blocks the interaction.
    ///
    /// Every `PipelineError` is fatal for the current turn — image
    /// resolution failures never become a `PipelineError` in the first
    /// place.
    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl From<IndexError> for PipelineError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::NoDocumentsFound { directory } => {
                PipelineError::NoDocumentsFound { directory }
            }
            IndexError::EmbeddingService(e) => PipelineError::EmbeddingService {
                message: e.to_string(),
            },
            other => PipelineError::IndexBuild {
                message: other.to_string(),
            },
        }
    }
}

impl From<EmbeddingError> for PipelineError {
    fn from(err: EmbeddingError) -> Self {
        PipelineError::EmbeddingService {
            message: err.to_string(),
        }
    }
}

impl From<ChatError> for PipelineError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Timeout { timeout_ms } => PipelineError::ModelTimeout { timeout_ms },
            ChatError::Unavailable { message } => PipelineError::ModelUnavailable { message },
            ChatError::InvalidResponse(message) => PipelineError::ModelUnavailable { message },
        }
    }
}
