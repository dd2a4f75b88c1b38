// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod images;
pub mod index;
pub mod llm;
pub mod rag;
pub mod scraper;
pub mod session;

// Re-export main types from core modules
pub use config::AppConfig;
pub use embeddings::{Embedding, EmbeddingClient, EmbeddingError, RemoteEmbeddingClient};
pub use images::{ImageResolution, ImageResolver, ResolvedImage};
pub use index::{
    ChunkIndex, DocumentChunk, IndexBuilder, IndexError, PdfDirectoryLoader, ScoredChunk,
    SharedIndex, TextSplitter,
};
pub use llm::{ChatClient, ChatError, GroqChatClient};
pub use rag::{AnswerSynthesizer, GroundedAnswer, PipelineError, RagPipeline, Retriever};
pub use session::{ConversationTurn, Mode, Phase, Session, SessionManager, SessionReply};
