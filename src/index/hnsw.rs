// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HNSW index over document chunks
//!
//! Hierarchical Navigable Small World (HNSW) structure for approximate
//! nearest neighbor search over chunk embeddings, using cosine distance on
//! normalized vectors. Built once per process (or per explicit rebuild) and
//! read-only afterwards; rebuilding replaces it wholesale.

use hnsw_rs::hnsw::{Hnsw, Neighbour};
use hnsw_rs::prelude::*;
use std::sync::Arc;

use super::chunker::DocumentChunk;
use super::errors::IndexError;

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: DocumentChunk,
    /// Cosine similarity score (higher is closer)
    pub score: f32,
    /// Insertion ordinal — original document order, used for tie-breaking
    pub ordinal: usize,
}

/// Read-only similarity index over `(chunk, embedding)` pairs
pub struct ChunkIndex {
    /// Wrapped in Arc for cheap sharing during concurrent searches
    hnsw: Arc<Hnsw<'static, f32, DistCosine>>,
    /// Chunks by insertion ordinal; ordinal is the HNSW data id
    chunks: Vec<DocumentChunk>,
    dimensions: usize,
}

impl std::fmt::Debug for ChunkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkIndex")
            .field("chunks", &self.chunks.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl ChunkIndex {
    /// Build an index from chunk/embedding pairs.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::IndexBuild` if any vector has the wrong
    /// dimensions or contains NaN/Infinity.
    pub fn build(
        entries: Vec<(DocumentChunk, Vec<f32>)>,
        dimensions: usize,
    ) -> Result<Self, IndexError> {
        for (i, (_, vector)) in entries.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(IndexError::IndexBuild(format!(
                    "vector {} has wrong dimensions: expected {}, got {}",
                    i,
                    dimensions,
                    vector.len()
                )));
            }
            if vector.iter().any(|&v| !v.is_finite()) {
                return Err(IndexError::IndexBuild(format!(
                    "vector {} contains NaN or Infinity values",
                    i
                )));
            }
        }

        let max_nb_connection = 12;
        let ef_construction = 48;
        let nb_layer = if entries.len() > 1 {
            ((entries.len() as f32).log2().ceil() as usize).clamp(4, 16)
        } else {
            4
        };

        let mut hnsw: Hnsw<f32, DistCosine> = Hnsw::new(
            max_nb_connection,
            entries.len().max(1),
            nb_layer,
            ef_construction,
            DistCosine,
        );

        let mut chunks = Vec::with_capacity(entries.len());
        for (ordinal, (chunk, vector)) in entries.into_iter().enumerate() {
            let normalized = normalize_vector(&vector);
            hnsw.insert((&normalized, ordinal));
            chunks.push(chunk);
        }

        hnsw.set_searching_mode(true);

        Ok(Self {
            hnsw: Arc::new(hnsw),
            chunks,
            dimensions,
        })
    }

    /// Search for the `k` nearest chunks.
    ///
    /// Results are sorted by descending similarity; exact ties fall back to
    /// original document order. An empty index returns an empty vec, never
    /// an error.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        if query.len() != self.dimensions {
            return Err(IndexError::IndexBuild(format!(
                "query has wrong dimensions: expected {}, got {}",
                self.dimensions,
                query.len()
            )));
        }
        if query.iter().any(|&v| !v.is_finite()) {
            return Err(IndexError::IndexBuild(
                "query contains NaN or Infinity values".to_string(),
            ));
        }

        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let normalized_query = normalize_vector(query);
        let ef_search = (k * 2).max(50);
        let neighbours: Vec<Neighbour> = self.hnsw.search(&normalized_query, k, ef_search);

        let mut results: Vec<ScoredChunk> = neighbours
            .into_iter()
            .filter_map(|n| {
                self.chunks.get(n.d_id).map(|chunk| ScoredChunk {
                    chunk: chunk.clone(),
                    // cosine distance -> similarity
                    score: 1.0 - n.distance,
                    ordinal: n.d_id,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.ordinal.cmp(&b.ordinal))
        });
        results.truncate(k);

        Ok(results)
    }

    /// Number of chunks in the index
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Normalize a vector to unit length for cosine similarity
fn normalize_vector(vector: &[f32]) -> Vec<f32> {
    let magnitude: f32 = vector.iter().map(|&x| x * x).sum::<f32>().sqrt();

    if magnitude == 0.0 || !magnitude.is_finite() {
        return vector.to_vec();
    }

    vector.iter().map(|&x| x / magnitude).collect()
}
