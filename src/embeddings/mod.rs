// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding vectors and the embedding-service client seam
//!
//! The index builder and the retriever both go through [`EmbeddingClient`],
//! so tests can swap the hosted API for a deterministic local implementation.

pub mod remote;

pub use remote::RemoteEmbeddingClient;

use async_trait::async_trait;
use thiserror::Error;

/// A fixed-length embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    data: Vec<f32>,
    dimension: usize,
}

impl Embedding {
    pub fn new(data: Vec<f32>) -> Self {
        let dimension = data.len();
        Self { data, dimension }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    pub fn magnitude(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Cosine similarity against another embedding.
    ///
    /// Mismatched dimensions and zero vectors yield 0.0 rather than an error;
    /// similarity scores are advisory, not load-bearing for correctness.
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        if self.dimension != other.dimension {
            return 0.0;
        }

        let dot_product: f32 = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum();

        let magnitude_self = self.magnitude();
        let magnitude_other = other.magnitude();

        if magnitude_self == 0.0 || magnitude_other == 0.0 {
            0.0
        } else {
            dot_product / (magnitude_self * magnitude_other)
        }
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

/// Errors from the hosted embedding service
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// HTTP-level failure from the embedding API
    #[error("Embedding API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Request exceeded the configured time budget
    #[error("Embedding request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Response body did not match the expected schema
    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),

    /// Service returned a vector of the wrong length
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Client seam for the external embedding service
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a single text into a fixed-length vector
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Expected output dimension of this client
    fn dimension(&self) -> usize;
}
