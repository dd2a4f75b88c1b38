// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::rag::PipelineError;

/// Wire shape of an error
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

/// Errors surfaced by the HTTP layer
#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    Pipeline(PipelineError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(e) => match e {
                PipelineError::NoDocumentsFound { .. } => StatusCode::SERVICE_UNAVAILABLE,
                PipelineError::EmbeddingService { .. } => StatusCode::BAD_GATEWAY,
                PipelineError::ModelUnavailable { .. } => StatusCode::BAD_GATEWAY,
                PipelineError::ModelTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                PipelineError::IndexBuild { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidRequest(message) => ErrorResponse {
                error_type: "invalid_request".to_string(),
                message: message.clone(),
            },
            ApiError::Pipeline(e) => ErrorResponse {
                error_type: e.error_code().to_lowercase(),
                message: e.user_message(),
            },
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, axum::Json(self.to_response())).into_response()
    }
}
