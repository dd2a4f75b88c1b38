// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Document index construction
//!
//! Orchestrates load -> split -> embed -> index. A failed embedding aborts
//! the whole build; no partial index is ever published.

use std::sync::Arc;
use tracing::{info, warn};

use super::chunker::TextSplitter;
use super::errors::IndexError;
use super::hnsw::ChunkIndex;
use super::loader::DocumentSource;
use crate::embeddings::EmbeddingClient;

/// Builds a [`ChunkIndex`] from a document source
pub struct IndexBuilder {
    source: Box<dyn DocumentSource>,
    splitter: TextSplitter,
    embeddings: Arc<dyn EmbeddingClient>,
    /// Only the first `max_documents` loaded documents are indexed; the
    /// rest are excluded (a memory/latency trade-off, logged but silent to
    /// callers)
    max_documents: usize,
}

impl IndexBuilder {
    pub fn new(
        source: Box<dyn DocumentSource>,
        splitter: TextSplitter,
        embeddings: Arc<dyn EmbeddingClient>,
        max_documents: usize,
    ) -> Self {
        Self {
            source,
            splitter,
            embeddings,
            max_documents,
        }
    }

    /// Build the index.
    ///
    /// # Errors
    ///
    /// * `IndexError::NoDocumentsFound` when the source yields zero parsable
    ///   documents.
    /// * `IndexError::EmbeddingService` when any chunk fails to embed; the
    ///   build aborts rather than publishing a partial index.
    pub async fn build(&self) -> Result<ChunkIndex, IndexError> {
        let documents = self.source.load()?;
        if documents.is_empty() {
            return Err(IndexError::NoDocumentsFound {
                directory: self.source.origin(),
            });
        }

        let total = documents.len();
        if total > self.max_documents {
            warn!(
                indexed = self.max_documents,
                excluded = total - self.max_documents,
                "document cap reached, later documents excluded from the index"
            );
        }

        let mut entries = Vec::new();
        for document in documents.into_iter().take(self.max_documents) {
            let chunks = self.splitter.split(&document.name, &document.text);
            for chunk in chunks {
                let embedding = self.embeddings.embed(&chunk.text).await?;
                entries.push((chunk, embedding.into_vec()));
            }
        }

        let index = ChunkIndex::build(entries, self.embeddings.dimension())?;
        info!(
            chunks = index.len(),
            dimensions = index.dimensions(),
            "document index built"
        );

        Ok(index)
    }
}
