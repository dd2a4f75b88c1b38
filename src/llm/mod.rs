// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat completion client seam
//!
//! The synthesizer and the image resolver both talk to the hosted model
//! through [`ChatClient`]; the production implementation is
//! [`GroqChatClient`].

pub mod client;

pub use client::GroqChatClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the hosted chat model
#[derive(Debug, Error)]
pub enum ChatError {
    /// Network or auth failure reaching the model service
    #[error("Model unavailable: {message}")]
    Unavailable { message: String },

    /// Response-time budget exceeded
    #[error("Model timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Completion arrived but did not match the expected schema
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

/// Client seam for the external language model.
///
/// Completions are untrusted free text; no schema is enforced downstream.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run a single-prompt completion and return the model's text
    async fn complete(&self, prompt: &str) -> Result<String, ChatError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}
