// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP surface of the assistant

use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::errors::ApiError;
use super::handlers::{BuildIndexResponse, ChatRequest, ChatResponse, HealthResponse};
use crate::images::extension_for;
use crate::index::SharedIndex;
use crate::rag::PipelineError;
use crate::session::SessionManager;

#[derive(Clone)]
struct AppState {
    manager: Arc<SessionManager>,
    index: Arc<SharedIndex>,
}

/// Bind and serve the chat API until the process exits
pub async fn start_server(
    addr: &str,
    manager: Arc<SessionManager>,
    index: Arc<SharedIndex>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState { manager, index };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/chat", post(chat_handler))
        .route("/v1/index/build", post(build_index_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        index_ready: state.index.is_ready().await,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<axum::Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "message must not be empty".to_string(),
        ));
    }

    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let reply = state
        .manager
        .handle_message(&session_id, request.mode, &request.message)
        .await?;

    let (image_base64, image_format) = match &reply.image {
        Some(image) => (
            Some(STANDARD.encode(&image.bytes)),
            Some(extension_for(image.format).to_string()),
        ),
        None => (None, None),
    };

    Ok(axum::Json(ChatResponse {
        session_id,
        reply: reply.text,
        image_base64,
        image_format,
        phase: reply.phase.as_str().to_string(),
        turns: reply.turns,
        recommendation_made: reply.recommendation_made,
    }))
}

async fn build_index_handler(
    State(state): State<AppState>,
) -> Result<axum::Json<BuildIndexResponse>, ApiError> {
    let started = Instant::now();
    let index = state
        .index
        .rebuild()
        .await
        .map_err(PipelineError::from)
        .map_err(ApiError::from)?;

    Ok(axum::Json(BuildIndexResponse {
        chunk_count: index.len(),
        dimensions: index.dimensions(),
        build_time_ms: started.elapsed().as_millis() as u64,
    }))
}
