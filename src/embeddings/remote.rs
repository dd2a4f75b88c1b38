// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hosted embedding service client (Gemini `embedContent`-style API)

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{Embedding, EmbeddingClient, EmbeddingError};
use crate::config::EmbeddingSettings;

// --- wire structs ---

#[derive(Serialize)]
struct EmbedContentRequest {
    model: String,
    content: ContentPayload,
}

#[derive(Serialize)]
struct ContentPayload {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Client for a hosted embedding API
pub struct RemoteEmbeddingClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    dimension: usize,
    timeout_ms: u64,
}

impl RemoteEmbeddingClient {
    /// Create a client from settings; the reqwest client carries the timeout.
    pub fn new(settings: &EmbeddingSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            dimension: settings.dimension,
            timeout_ms: settings.timeout_secs * 1000,
        })
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/models/{}:embedContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl EmbeddingClient for RemoteEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let request = EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: ContentPayload {
                parts: vec![TextPart {
                    text: text.to_string(),
                }],
            },
        };

        let response = self
            .client
            .post(self.embed_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    EmbeddingError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let values = body.embedding.values;
        if values.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: values.len(),
            });
        }

        debug!(chars = text.len(), model = %self.model, "embedded text");
        Ok(Embedding::new(values))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
