// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Groq chat completion client via the OpenAI-compatible API

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::{ChatClient, ChatError};
use crate::config::ChatSettings;

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Client for the Groq chat completion API (OpenAI-compatible)
pub struct GroqChatClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    timeout_ms: u64,
}

impl GroqChatClient {
    /// Create a new chat client
    pub fn new(settings: &ChatSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let endpoint = settings.endpoint.trim_end_matches('/').to_string();
        info!(
            "chat client configured: endpoint={}, model={}",
            endpoint, settings.model
        );

        Ok(Self {
            client,
            endpoint,
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout_ms: settings.timeout_secs * 1000,
        })
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    ChatError::Unavailable {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Unavailable {
                message: format!("HTTP {}: {}", status.as_u16(), message),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ChatError::InvalidResponse("no choices in completion".to_string()))?;

        debug!(
            prompt_chars = prompt.len(),
            reply_chars = content.len(),
            "completion received"
        );

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ChatSettings {
        ChatSettings {
            endpoint: "https://api.groq.com/openai/v1/".to_string(),
            model: "llama3-8b-8192".to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 60,
            max_tokens: 1024,
            temperature: 0.2,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GroqChatClient::new(&settings()).unwrap();
        assert_eq!(client.model_name(), "llama3-8b-8192");
        // trailing slash is normalized away
        assert_eq!(client.endpoint, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Tulsi is sacred basil."}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Tulsi is sacred basil.");
    }
}
