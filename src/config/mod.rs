// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Application configuration loaded from environment variables
//!
//! All knobs have defaults matching the original deployment; only the two
//! hosted-API keys are mandatory.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Default chunking window in characters
pub const DEFAULT_CHUNK_WINDOW: usize = 1000;
/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
/// Only this many documents (in lexicographic order) are indexed
pub const DEFAULT_MAX_DOCUMENTS: usize = 20;
/// Default number of chunks retrieved per query
pub const DEFAULT_TOP_K: usize = 4;
/// Triage mode waits for this many user turns before answering
pub const DEFAULT_TRIAGE_MIN_TURNS: usize = 3;

/// Embedding service settings
#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub dimension: usize,
    pub timeout_secs: u64,
}

/// Chat completion service settings
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP API binds to
    pub api_addr: String,
    /// Directory holding the PDF monograph corpus
    pub documents_dir: PathBuf,
    /// Directory of locally harvested herb images
    pub herb_images_dir: PathBuf,
    pub chunk_window: usize,
    pub chunk_overlap: usize,
    pub max_documents: usize,
    pub top_k: usize,
    pub triage_min_turns: usize,
    pub embedding: EmbeddingSettings,
    pub chat: ChatSettings,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails if `GROQ_API_KEY` or `GOOGLE_API_KEY` is missing — the service
    /// cannot answer anything without the hosted model and embedding APIs.
    pub fn from_env() -> Result<Self> {
        let chat_key = env::var("GROQ_API_KEY").context("GROQ_API_KEY is not set")?;
        let embed_key = env::var("GOOGLE_API_KEY").context("GOOGLE_API_KEY is not set")?;

        let api_port = env_or("API_PORT", "8080");
        let api_host = env_or("API_HOST", "127.0.0.1");

        Ok(Self {
            api_addr: format!("{}:{}", api_host, api_port),
            documents_dir: PathBuf::from(env_or("DOCUMENTS_DIR", "./dataset")),
            herb_images_dir: PathBuf::from(env_or("HERB_IMAGES_DIR", "./AyurHerbs")),
            chunk_window: env_parse("CHUNK_WINDOW", DEFAULT_CHUNK_WINDOW),
            chunk_overlap: env_parse("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP),
            max_documents: env_parse("MAX_DOCUMENTS", DEFAULT_MAX_DOCUMENTS),
            top_k: env_parse("TOP_K", DEFAULT_TOP_K),
            triage_min_turns: env_parse("TRIAGE_MIN_TURNS", DEFAULT_TRIAGE_MIN_TURNS),
            embedding: EmbeddingSettings {
                endpoint: env_or(
                    "EMBEDDING_API_BASE",
                    "https://generativelanguage.googleapis.com/v1beta",
                ),
                model: env_or("EMBEDDING_MODEL", "embedding-001"),
                api_key: embed_key,
                dimension: env_parse("EMBEDDING_DIMENSION", 768),
                timeout_secs: env_parse("EMBEDDING_TIMEOUT_SECS", 30),
            },
            chat: ChatSettings {
                endpoint: env_or("GROQ_API_BASE", "https://api.groq.com/openai/v1"),
                model: env_or("CHAT_MODEL", "llama3-8b-8192"),
                api_key: chat_key,
                timeout_secs: env_parse("CHAT_TIMEOUT_SECS", 60),
                max_tokens: env_parse("CHAT_MAX_TOKENS", 1024),
                temperature: env_parse("CHAT_TEMPERATURE", 0.2),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        std::env::set_var("TEST_CHUNK_WINDOW_GARBAGE", "not-a-number");
        let parsed: usize = env_parse("TEST_CHUNK_WINDOW_GARBAGE", 42);
        assert_eq!(parsed, 42);
        std::env::remove_var("TEST_CHUNK_WINDOW_GARBAGE");
    }

    #[test]
    fn test_defaults_match_observed_deployment() {
        assert_eq!(DEFAULT_CHUNK_WINDOW, 1000);
        assert_eq!(DEFAULT_CHUNK_OVERLAP, 200);
        assert_eq!(DEFAULT_MAX_DOCUMENTS, 20);
        assert_eq!(DEFAULT_TRIAGE_MIN_TURNS, 3);
    }
}
