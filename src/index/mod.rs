// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Document Index Builder
//!
//! Loads the PDF monograph corpus, splits it into overlapping chunks,
//! embeds each chunk via the external embedding service, and builds an
//! in-memory HNSW similarity index. Built once per process lifetime,
//! lazily on first use or by explicit trigger.

pub mod builder;
pub mod chunker;
pub mod errors;
pub mod hnsw;
pub mod loader;
pub mod shared;

pub use builder::IndexBuilder;
pub use chunker::{DocumentChunk, TextSplitter};
pub use errors::IndexError;
pub use hnsw::{ChunkIndex, ScoredChunk};
pub use loader::{DocumentSource, LoadedDocument, PdfDirectoryLoader, StaticDocumentSource};
pub use shared::SharedIndex;
