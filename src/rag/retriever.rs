// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query-time retrieval against the shared chunk index

use std::sync::Arc;
use tracing::debug;

use super::errors::PipelineError;
use crate::embeddings::EmbeddingClient;
use crate::index::{ScoredChunk, SharedIndex};

/// Retrieves the top-matching chunks for a query.
///
/// Read-only over the index; building the index first is a prerequisite
/// handled through the shared handle, not an error path.
pub struct Retriever {
    index: Arc<SharedIndex>,
    embeddings: Arc<dyn EmbeddingClient>,
}

impl Retriever {
    pub fn new(index: Arc<SharedIndex>, embeddings: Arc<dyn EmbeddingClient>) -> Self {
        Self { index, embeddings }
    }

    /// Retrieve up to `k` chunks ordered by descending similarity.
    ///
    /// An empty index yields an empty sequence, not an error.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, PipelineError> {
        let index = self.index.get_or_build().await?;

        if index.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embeddings.embed(query).await?;
        let results = index.search(query_embedding.data(), k)?;

        debug!(
            query_chars = query.len(),
            hits = results.len(),
            "retrieved context chunks"
        );

        Ok(results)
    }
}
