// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request/response types for the chat API

use serde::{Deserialize, Serialize};

use crate::session::Mode;

/// One chat message from a client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Omitted on first contact; the server mints one
    #[serde(default)]
    pub session_id: Option<String>,
    pub mode: Mode,
    pub message: String,
}

/// Assistant reply for one chat message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    /// Illustration bytes, when one was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    /// Extension of the illustration format ("jpg", "png", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_format: Option<String>,
    pub phase: String,
    pub turns: usize,
    pub recommendation_made: bool,
}

/// Result of an explicit index (re)build
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildIndexResponse {
    pub chunk_count: usize,
    pub dimensions: usize,
    pub build_time_ms: u64,
}

/// Service health
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub index_ready: bool,
    pub version: String,
}
