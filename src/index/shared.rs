// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-wide index handle
//!
//! The index is shared read-only across sessions. Publication is atomic:
//! retrievals hold an `Arc` snapshot of a fully built index, and a rebuild
//! holds the write lock for the duration of the build, so a half-built
//! index is never observable. A failed rebuild leaves the previous index in
//! place.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::builder::IndexBuilder;
use super::errors::IndexError;
use super::hnsw::ChunkIndex;

/// Shared, lazily built index slot
pub struct SharedIndex {
    slot: RwLock<Option<Arc<ChunkIndex>>>,
    builder: IndexBuilder,
}

impl SharedIndex {
    pub fn new(builder: IndexBuilder) -> Self {
        Self {
            slot: RwLock::new(None),
            builder,
        }
    }

    /// Return the current index, building it first if absent.
    ///
    /// Building is a synchronous prerequisite, not an error; concurrent
    /// callers during a build wait on the write lock and then reuse the
    /// published result.
    pub async fn get_or_build(&self) -> Result<Arc<ChunkIndex>, IndexError> {
        if let Some(index) = self.slot.read().await.as_ref() {
            return Ok(index.clone());
        }

        let mut slot = self.slot.write().await;
        // another caller may have built while we waited for the write lock
        if let Some(index) = slot.as_ref() {
            return Ok(index.clone());
        }

        let built = Arc::new(self.builder.build().await?);
        *slot = Some(built.clone());
        Ok(built)
    }

    /// Rebuild the index, replacing the previous one wholesale.
    ///
    /// Holds the write lock across the build so no retrieval can start
    /// against a half-built index; on failure the previous index survives.
    pub async fn rebuild(&self) -> Result<Arc<ChunkIndex>, IndexError> {
        let mut slot = self.slot.write().await;
        let built = Arc::new(self.builder.build().await?);
        *slot = Some(built.clone());
        Ok(built)
    }

    /// Current index, if one has been published
    pub async fn snapshot(&self) -> Option<Arc<ChunkIndex>> {
        self.slot.read().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.slot.read().await.is_some()
    }
}
